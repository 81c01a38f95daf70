//! Game board representation and collision detection

use crate::coord::Coord;
use std::collections::BTreeSet;
use std::fmt;

/// Board dimensions
pub const BOARD_WIDTH: i32 = 10;
pub const BOARD_HEIGHT: i32 = 20;

/// The game board
///
/// Occupancy is sparse: only filled cells are stored. Row 0 is the top row.
/// Every stored cell lies inside `[0, BOARD_HEIGHT) x [0, BOARD_WIDTH)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Board {
    cells: BTreeSet<Coord>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from arbitrary cells, dropping any outside the grid
    pub fn from_cells<I: IntoIterator<Item = Coord>>(cells: I) -> Self {
        Self {
            cells: cells.into_iter().filter(Self::is_in_bounds).collect(),
        }
    }

    pub fn width(&self) -> i32 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> i32 {
        BOARD_HEIGHT
    }

    pub fn is_in_bounds(cell: &Coord) -> bool {
        (0..BOARD_HEIGHT).contains(&cell.row) && (0..BOARD_WIDTH).contains(&cell.col)
    }

    pub fn is_occupied(&self, cell: &Coord) -> bool {
        self.cells.contains(cell)
    }

    /// True when every cell is on the grid and empty
    pub fn can_place<'a, I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = &'a Coord>,
    {
        cells
            .into_iter()
            .all(|cell| Self::is_in_bounds(cell) && !self.is_occupied(cell))
    }

    /// Lock cells into a new board. Already-filled cells stay filled.
    pub fn with_piece<'a, I>(&self, cells: I) -> Board
    where
        I: IntoIterator<Item = &'a Coord>,
    {
        let mut next = self.cells.clone();
        next.extend(cells.into_iter().copied().filter(Self::is_in_bounds));
        Board { cells: next }
    }

    /// Rows in which every column is filled
    pub fn completed_rows(&self) -> BTreeSet<i32> {
        (0..BOARD_HEIGHT)
            .filter(|&row| self.row_count(row) == BOARD_WIDTH as usize)
            .collect()
    }

    /// Remove the given rows and let everything above them fall.
    ///
    /// A surviving cell moves down by the number of removed rows that lie
    /// strictly below it (greater row index).
    pub fn clear_rows(&self, rows: &BTreeSet<i32>) -> Board {
        if rows.is_empty() {
            return self.clone();
        }
        let cells = self
            .cells
            .iter()
            .filter(|cell| !rows.contains(&cell.row))
            .map(|cell| {
                let below = rows.range(cell.row + 1..).count() as i32;
                cell.translate(below, 0)
            })
            .collect();
        Board { cells }
    }

    /// Number of filled cells in a row
    pub fn row_count(&self, row: i32) -> usize {
        self.cells
            .range(Coord::new(row, i32::MIN)..=Coord::new(row, i32::MAX))
            .count()
    }

    /// Filled cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Coord> + '_ {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_HEIGHT {
            for col in 0..BOARD_WIDTH {
                let glyph = if self.is_occupied(&Coord::new(row, col)) {
                    "■ "
                } else {
                    "□ "
                };
                f.write_str(glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
