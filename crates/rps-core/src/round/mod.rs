//! Per-round state: the resolver and the synthetic opponent

pub mod opponent;
pub mod resolver;

pub use opponent::OpponentMoveSource;
pub use resolver::{RoundEvent, RoundResolver, RoundState};
