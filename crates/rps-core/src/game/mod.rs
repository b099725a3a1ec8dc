//! Match-level state across rounds

pub mod config;
pub mod controller;
pub mod session;

pub use config::{GameMode, SessionConfig};
pub use controller::{MatchController, MatchState, Winner};
pub use session::MatchSession;
