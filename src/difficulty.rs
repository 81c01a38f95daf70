//! Difficulty levels: Easy, Normal, Hard, Extreme

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Extreme,
}

/// Score multiplier as an exact fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Multiplier {
    pub numerator: u64,
    pub denominator: u64,
}

impl Multiplier {
    /// Scale a point value, rounding down
    pub fn apply(&self, points: u64) -> u64 {
        points * self.numerator / self.denominator
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numerator % self.denominator == 0 {
            write!(f, "{}x", self.numerator / self.denominator)
        } else {
            write!(f, "{}/{}x", self.numerator, self.denominator)
        }
    }
}

/// (gravity period in ticks, score multiplier) per level
const TABLE: [(Difficulty, u64, Multiplier); 4] = [
    (Difficulty::Easy, 15, Multiplier { numerator: 1, denominator: 1 }),
    (Difficulty::Normal, 10, Multiplier { numerator: 1, denominator: 1 }),
    (Difficulty::Hard, 6, Multiplier { numerator: 3, denominator: 2 }),
    (Difficulty::Extreme, 3, Multiplier { numerator: 2, denominator: 1 }),
];

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Slow gravity, standard scoring",
            Difficulty::Normal => "Balanced gravity, standard scoring",
            Difficulty::Hard => "Fast gravity, 1.5x score",
            Difficulty::Extreme => "Very fast gravity, 2x score",
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Easy,
            Difficulty::Normal,
            Difficulty::Hard,
            Difficulty::Extreme,
        ]
    }

    fn entry(&self) -> &'static (Difficulty, u64, Multiplier) {
        &TABLE[*self as usize]
    }

    /// Ticks between forced one-row descents
    pub fn gravity_period(&self) -> u64 {
        self.entry().1
    }

    pub fn score_multiplier(&self) -> Multiplier {
        self.entry().2
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::all()
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown difficulty '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_variants() {
        for difficulty in Difficulty::all() {
            assert_eq!(difficulty.entry().0, *difficulty);
        }
    }

    #[test]
    fn test_gravity_gets_faster() {
        let periods: Vec<_> = Difficulty::all().iter().map(|d| d.gravity_period()).collect();
        assert_eq!(periods, vec![15, 10, 6, 3]);
    }

    #[test]
    fn test_multiplier_apply() {
        assert_eq!(Difficulty::Normal.score_multiplier().apply(100), 100);
        assert_eq!(Difficulty::Hard.score_multiplier().apply(100), 150);
        assert_eq!(Difficulty::Extreme.score_multiplier().apply(300), 600);
        assert_eq!(Difficulty::Hard.score_multiplier().to_string(), "3/2x");
    }

    #[test]
    fn test_parse() {
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" EXTREME ".parse::<Difficulty>(), Ok(Difficulty::Extreme));
        assert!("impossible".parse::<Difficulty>().is_err());
    }
}
