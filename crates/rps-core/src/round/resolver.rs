//! Round state machine
//!
//! A round settles the first frame both positions show a move. It stays
//! settled, draws included, until a frame arrives with no move at either
//! position (hands lowered), which opens the next round.

use crate::moves::{Move, Outcome};
use log::debug;
use serde::{Deserialize, Serialize};

/// Moves seen on the latest frame and whether the current round is settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub primary: Option<Move>,
    pub secondary: Option<Move>,
    pub settled: bool,
}

impl RoundState {
    pub fn is_settled(&self) -> bool {
        self.settled
    }
}

/// What a single frame did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// Unsettled and still missing at least one move.
    Pending,
    /// The round resolved on this frame.
    Settled(Outcome),
    /// Already settled; waiting for hands to be lowered.
    Held,
    /// No move at either position. The round is open again.
    Reset,
}

#[derive(Debug, Clone, Default)]
pub struct RoundResolver {
    state: RoundState,
}

impl RoundResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Apply one frame's resolved moves.
    pub fn step(&mut self, primary: Option<Move>, secondary: Option<Move>) -> RoundEvent {
        self.state.primary = primary;
        self.state.secondary = secondary;

        match (primary, secondary) {
            (None, None) => {
                if self.state.settled {
                    debug!("hands lowered, round reopened");
                }
                self.state.settled = false;
                RoundEvent::Reset
            }
            (Some(p), Some(s)) if !self.state.settled => {
                self.state.settled = true;
                let outcome = Outcome::resolve(p, s);
                debug!("round settled: {} vs {} -> {:?}", p, s, outcome);
                RoundEvent::Settled(outcome)
            }
            _ if self.state.settled => RoundEvent::Held,
            _ => RoundEvent::Pending,
        }
    }
}
