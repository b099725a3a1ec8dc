//! Match controller
//!
//! Wraps the round resolver, applies round wins to the scoreboard and freezes
//! the match once either side reaches the target.

use super::config::{GameMode, SessionConfig};
use crate::error::ArenaError;
use crate::moves::{Move, Position};
use crate::round::{RoundEvent, RoundResolver, RoundState};
use crate::signal::{Signal, SignalSink};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Primary,
    Secondary,
    Synthetic,
}

impl Winner {
    pub fn label(self) -> &'static str {
        match self {
            Winner::Primary => "Player 1",
            Winner::Secondary => "Player 2",
            Winner::Synthetic => "AI",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Winner: {}", self.label())
    }
}

/// Scoreboard snapshot. Frozen once `concluded` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub primary_score: u32,
    pub secondary_score: u32,
    pub concluded: bool,
    pub final_winner: Option<Winner>,
    pub target_score: u32,
    pub mode: GameMode,
}

impl MatchState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            primary_score: 0,
            secondary_score: 0,
            concluded: false,
            final_winner: None,
            target_score: config.target_score,
            mode: config.mode,
        }
    }

    pub fn score(&self, position: Position) -> u32 {
        match position {
            Position::Primary => self.primary_score,
            Position::Secondary => self.secondary_score,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchController {
    state: MatchState,
    resolver: RoundResolver,
    last_event: RoundEvent,
}

impl MatchController {
    pub fn new(config: SessionConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self {
            state: MatchState::new(&config),
            resolver: RoundResolver::new(),
            last_event: RoundEvent::Pending,
        })
    }

    /// Feed one frame's moves through the round and return the scoreboard.
    ///
    /// After the match concludes this does nothing and keeps returning the
    /// frozen snapshot.
    pub fn advance<F: Clone>(
        &mut self,
        primary: Option<Move>,
        secondary: Option<Move>,
        frame: &F,
        signals: &mut impl SignalSink<F>,
    ) -> MatchState {
        if self.state.concluded {
            self.last_event = RoundEvent::Held;
            return self.state.clone();
        }

        let event = self.resolver.step(primary, secondary);
        self.last_event = event;

        if let RoundEvent::Settled(outcome) = event {
            match outcome.winner() {
                Some(winner) => {
                    self.award(winner);
                    signals.emit(Signal::RoundWon {
                        winner,
                        frame: frame.clone(),
                    });
                }
                None => info!("round drawn"),
            }
        }

        self.state.clone()
    }

    fn award(&mut self, winner: Position) {
        match winner {
            Position::Primary => self.state.primary_score += 1,
            Position::Secondary => self.state.secondary_score += 1,
        }
        info!(
            "round won by {:?}: {} - {}",
            winner, self.state.primary_score, self.state.secondary_score
        );

        let target = self.state.target_score;
        if self.state.primary_score == target || self.state.secondary_score == target {
            let final_winner = if self.state.primary_score > self.state.secondary_score {
                Winner::Primary
            } else if self.state.mode == GameMode::VsSynthetic {
                Winner::Synthetic
            } else {
                Winner::Secondary
            };
            self.state.concluded = true;
            self.state.final_winner = Some(final_winner);
            info!("match concluded, {}", final_winner);
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn round(&self) -> &RoundState {
        self.resolver.state()
    }

    /// What the most recent `advance` did to the round.
    pub fn last_event(&self) -> RoundEvent {
        self.last_event
    }

    pub fn is_concluded(&self) -> bool {
        self.state.concluded
    }
}
