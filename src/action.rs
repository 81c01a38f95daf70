//! Input actions the engine understands

use std::fmt;
use std::str::FromStr;

/// One input per tick. `None` means "no input"; gravity still applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameAction {
    Left,
    Right,
    Down,
    Rotate,
    Drop,
    Pause,
    /// Consumed by the session loop, never changes the board
    Quit,
    #[default]
    None,
}

impl GameAction {
    pub fn all() -> [GameAction; 8] {
        [
            GameAction::Left,
            GameAction::Right,
            GameAction::Down,
            GameAction::Rotate,
            GameAction::Drop,
            GameAction::Pause,
            GameAction::Quit,
            GameAction::None,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Left => "left",
            GameAction::Right => "right",
            GameAction::Down => "down",
            GameAction::Rotate => "rotate",
            GameAction::Drop => "drop",
            GameAction::Pause => "pause",
            GameAction::Quit => "quit",
            GameAction::None => "none",
        }
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that does not name an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseActionError(pub String);

impl fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action '{}'", self.0)
    }
}

impl std::error::Error for ParseActionError {}

impl FromStr for GameAction {
    type Err = ParseActionError;

    /// Case-insensitive; accepts the full names plus a few single-key aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s.trim().to_lowercase().as_str() {
            "left" | "h" => GameAction::Left,
            "right" | "l" => GameAction::Right,
            "down" | "j" => GameAction::Down,
            "rotate" | "k" | "up" => GameAction::Rotate,
            "drop" | "space" => GameAction::Drop,
            "pause" | "p" => GameAction::Pause,
            "quit" | "q" => GameAction::Quit,
            "none" | "" => GameAction::None,
            _ => return Err(ParseActionError(s.to_string())),
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for action in GameAction::all() {
            assert_eq!(action.as_str().parse::<GameAction>(), Ok(action));
        }
    }

    #[test]
    fn test_aliases_and_case() {
        assert_eq!("LEFT".parse::<GameAction>(), Ok(GameAction::Left));
        assert_eq!("  q ".parse::<GameAction>(), Ok(GameAction::Quit));
        assert_eq!("".parse::<GameAction>(), Ok(GameAction::None));
    }

    #[test]
    fn test_unknown_action() {
        let err = "jump".parse::<GameAction>().unwrap_err();
        assert_eq!(err.to_string(), "unknown action 'jump'");
    }
}
