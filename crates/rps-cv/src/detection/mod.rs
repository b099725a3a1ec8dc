//! Detection layer: raw detections, their cleanup and position assignment

pub mod assigner;
pub mod config;
pub mod detector;

pub use assigner::{PositionSlots, SpatialAssigner};
pub use config::ArenaConfig;
pub use detector::{filter_detections, Detection, ReplayDetector};
