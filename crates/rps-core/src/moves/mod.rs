//! Gestures and the pairwise rule between them

pub mod gesture;
pub mod outcome;

pub use gesture::{Move, CLASS_NAMES};
pub use outcome::{Outcome, Position};
