use super::Move;
use serde::{Deserialize, Serialize};

/// Playing position, decided per frame by which half of the frame a hand is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Primary,
    Secondary,
}

/// Result of one exchange of moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Draw,
    PrimaryWins,
    SecondaryWins,
}

impl Outcome {
    pub fn resolve(primary: Move, secondary: Move) -> Outcome {
        if primary == secondary {
            Outcome::Draw
        } else if primary.beats() == secondary {
            Outcome::PrimaryWins
        } else {
            Outcome::SecondaryWins
        }
    }

    /// Winning position, or `None` on a draw.
    pub fn winner(self) -> Option<Position> {
        match self {
            Outcome::Draw => None,
            Outcome::PrimaryWins => Some(Position::Primary),
            Outcome::SecondaryWins => Some(Position::Secondary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_antisymmetric_off_diagonal() {
        for a in Move::ALL {
            assert_eq!(Outcome::resolve(a, a), Outcome::Draw);
            for b in Move::ALL.into_iter().filter(|&b| b != a) {
                let forward = Outcome::resolve(a, b);
                let backward = Outcome::resolve(b, a);
                assert_ne!(forward, Outcome::Draw);
                assert_eq!(
                    forward == Outcome::PrimaryWins,
                    backward == Outcome::SecondaryWins
                );
            }
        }
    }

    #[test]
    fn test_primary_wins_table() {
        assert_eq!(Outcome::resolve(Move::Rock, Move::Scissors), Outcome::PrimaryWins);
        assert_eq!(Outcome::resolve(Move::Paper, Move::Rock), Outcome::PrimaryWins);
        assert_eq!(Outcome::resolve(Move::Scissors, Move::Paper), Outcome::PrimaryWins);
        assert_eq!(Outcome::resolve(Move::Rock, Move::Paper), Outcome::SecondaryWins);
    }

    #[test]
    fn test_winner() {
        assert_eq!(Outcome::Draw.winner(), None);
        assert_eq!(Outcome::PrimaryWins.winner(), Some(Position::Primary));
        assert_eq!(Outcome::SecondaryWins.winner(), Some(Position::Secondary));
    }
}
