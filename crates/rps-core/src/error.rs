use thiserror::Error;

/// Errors raised before or while a match stream is set up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("target score must be a positive integer, got {0}")]
    InvalidTargetScore(u32),

    #[error("unrecognized game mode: {0:?}")]
    UnknownMode(String),

    #[error("unrecognized gesture label: {0:?}")]
    UnknownGesture(String),

    #[error("frame source unavailable: {0}")]
    StreamUnavailable(String),
}
