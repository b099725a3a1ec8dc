use crate::traits::FrameSource;
use crate::Result;
use image::RgbImage;
use std::collections::VecDeque;

/// Frames held in memory, yielded in order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    frames: VecDeque<RgbImage>,
}

impl MemorySource {
    pub fn new(frames: impl IntoIterator<Item = RgbImage>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl FrameSource for MemorySource {
    fn read(&mut self) -> Result<Option<RgbImage>> {
        Ok(self.frames.pop_front())
    }
}
