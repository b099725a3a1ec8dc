//! Rock-Paper-Scissors vision layer
//!
//! Turns raw frames into per-position moves, drives a match session with
//! them and draws the scoreboard back onto each frame.

pub mod archive;
pub mod bbox;
pub mod detection;
pub mod dispatch;
pub mod render;
pub mod source;
pub mod stream;
pub mod utils;

// Re-export commonly used types
pub use archive::{RecentSnapshots, SnapshotArchive};
pub use bbox::{BBox, BBoxCollection};
pub use detection::{ArenaConfig, Detection, PositionSlots, ReplayDetector, SpatialAssigner};
pub use dispatch::{Cue, LogCues, SignalDispatcher};
pub use render::{Annotation, FrameRenderer};
pub use source::{CameraSource, DirectorySource, MemorySource};
pub use stream::ArenaStream;

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Capabilities the frame pipeline is assembled from
pub mod traits {
    use super::*;
    use crate::dispatch::Cue;
    use image::RgbImage;

    /// Classifies hand gestures on a frame. May return nothing.
    pub trait GestureDetector {
        fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>>;
    }

    impl<F> GestureDetector for F
    where
        F: FnMut(&RgbImage) -> Result<Vec<Detection>>,
    {
        fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>> {
            self(frame)
        }
    }

    /// Sequential, blocking frame producer. `Ok(None)` marks the end of the stream.
    pub trait FrameSource {
        fn read(&mut self) -> Result<Option<RgbImage>>;
    }

    impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
        fn read(&mut self) -> Result<Option<RgbImage>> {
            (**self).read()
        }
    }

    /// Plays a short audio cue.
    pub trait CuePlayer: Send {
        fn play(&mut self, cue: Cue) -> Result<()>;
    }
}
