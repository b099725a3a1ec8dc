//! Rock-Paper-Scissors match core
//!
//! Round and match state driven one frame at a time. Nothing here knows how
//! frames are captured, classified or drawn; the frame type only travels
//! through as the payload of a round-won signal.

pub mod error;
pub mod game;
pub mod moves;
pub mod round;
pub mod signal;

pub use error::ArenaError;
pub use game::{GameMode, MatchController, MatchSession, MatchState, SessionConfig, Winner};
pub use moves::{Move, Outcome, Position, CLASS_NAMES};
pub use round::{OpponentMoveSource, RoundEvent, RoundResolver, RoundState};
pub use signal::{Discard, Signal, SignalSink};
