//! Replay of still frames from a directory

use crate::traits::FrameSource;
use crate::utils::ImageUtils;
use crate::Result;
use image::RgbImage;
use log::info;
use rps_core::ArenaError;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Image files of a directory, played in file-name order.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    frames: VecDeque<PathBuf>,
}

impl DirectorySource {
    /// List the directory's frames.
    ///
    /// A missing, unreadable or frame-less directory is
    /// [`ArenaError::StreamUnavailable`].
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir)
            .map_err(|e| ArenaError::StreamUnavailable(format!("{}: {e}", dir.display())))?;

        let mut frames: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .map(|ext| ext.to_string_lossy().to_lowercase())
                    .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
            })
            .collect();

        if frames.is_empty() {
            return Err(ArenaError::StreamUnavailable(format!(
                "{}: no image frames",
                dir.display()
            ))
            .into());
        }

        frames.sort();
        info!("replaying {} frames from {}", frames.len(), dir.display());
        Ok(Self {
            frames: frames.into(),
        })
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for DirectorySource {
    fn read(&mut self) -> Result<Option<RgbImage>> {
        let Some(path) = self.frames.pop_front() else {
            return Ok(None);
        };
        ImageUtils::load_rgb(&path).map(Some)
    }
}
