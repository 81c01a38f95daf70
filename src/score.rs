//! Line-clear scoring

use crate::difficulty::Difficulty;

/// Base award indexed by rows cleared in a single lock
/// A quadruple is worth twice as much as four singles
pub const LINE_CLEAR_AWARDS: [u64; 5] = [0, 100, 300, 500, 800];

/// Type of line clear for scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearType {
    Single,
    Double,
    Triple,
    Quad,
}

impl ClearType {
    pub fn from_lines(lines: usize) -> Option<ClearType> {
        match lines {
            1 => Some(ClearType::Single),
            2 => Some(ClearType::Double),
            3 => Some(ClearType::Triple),
            4 => Some(ClearType::Quad),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClearType::Single => "Single",
            ClearType::Double => "Double",
            ClearType::Triple => "Triple",
            ClearType::Quad => "Quad",
        }
    }
}

/// What a single lock cleared and what it paid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClear {
    pub lines: u32,
    pub points: u64,
}

impl LineClear {
    pub fn clear_type(&self) -> Option<ClearType> {
        ClearType::from_lines(self.lines as usize)
    }
}

/// Base award for clearing `lines` rows at once
pub fn base_award(lines: usize) -> u64 {
    LINE_CLEAR_AWARDS[lines.min(LINE_CLEAR_AWARDS.len() - 1)]
}

/// Points for a lock that cleared `lines` rows on the given difficulty
pub fn line_clear_points(lines: usize, difficulty: Difficulty) -> u64 {
    difficulty.score_multiplier().apply(base_award(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_awards_increase() {
        for pair in LINE_CLEAR_AWARDS.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_quad_is_disproportionate() {
        assert!(base_award(4) > 4 * base_award(1));
    }

    #[test]
    fn test_single_clear() {
        assert_eq!(line_clear_points(1, Difficulty::Normal), 100);
        assert_eq!(line_clear_points(1, Difficulty::Hard), 150);
    }

    #[test]
    fn test_quad_on_extreme() {
        assert_eq!(line_clear_points(4, Difficulty::Extreme), 1600);
    }

    #[test]
    fn test_no_lines_no_points() {
        for difficulty in Difficulty::all() {
            assert_eq!(line_clear_points(0, *difficulty), 0);
        }
    }

    #[test]
    fn test_clear_type_names() {
        assert_eq!(ClearType::from_lines(0), None);
        assert_eq!(ClearType::from_lines(4).map(|c| c.name()), Some("Quad"));
        let clear = LineClear { lines: 2, points: 300 };
        assert_eq!(clear.clear_type(), Some(ClearType::Double));
    }
}
