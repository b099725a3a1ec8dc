use crate::error::ArenaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class order produced by the gesture model, indexed by class id.
pub const CLASS_NAMES: [&str; 3] = ["Paper", "Rock", "Scissors"];

/// A hand gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The move this one defeats.
    pub fn beats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    /// Map a detector class id onto a move.
    pub fn from_class_index(index: usize) -> Option<Move> {
        CLASS_NAMES.get(index).and_then(|name| name.parse().ok())
    }

    pub fn label(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Move {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            _ => Err(ArenaError::UnknownGesture(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_index_order() {
        assert_eq!(Move::from_class_index(0), Some(Move::Paper));
        assert_eq!(Move::from_class_index(1), Some(Move::Rock));
        assert_eq!(Move::from_class_index(2), Some(Move::Scissors));
        assert_eq!(Move::from_class_index(3), None);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(" ROCK ".parse::<Move>(), Ok(Move::Rock));
        assert_eq!("scissors".parse::<Move>(), Ok(Move::Scissors));
        assert_eq!(
            "lizard".parse::<Move>(),
            Err(ArenaError::UnknownGesture("lizard".to_string()))
        );
    }

    #[test]
    fn test_each_move_beats_exactly_one_other() {
        for m in Move::ALL {
            assert_ne!(m.beats(), m);
            assert_ne!(m.beats().beats(), m);
        }
    }
}
