//! Snapshot archive for round-winning frames
//!
//! Files are named by wall-clock time. The most recent paths are kept in a
//! bounded ring so status pages can list them without scanning the
//! directory.

use crate::detection::config::ArchiveConfig;
use crate::Result;
use anyhow::Context;
use chrono::Local;
use image::RgbImage;
use log::info;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared, bounded list of the latest snapshot paths, oldest first.
#[derive(Debug, Clone)]
pub struct RecentSnapshots {
    paths: Arc<Mutex<VecDeque<PathBuf>>>,
    capacity: usize,
}

impl RecentSnapshots {
    pub fn new(capacity: usize) -> Self {
        Self {
            paths: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    fn record(&self, path: PathBuf) {
        if self.capacity == 0 {
            return;
        }
        let mut paths = self.paths.lock().unwrap_or_else(PoisonError::into_inner);
        while paths.len() >= self.capacity {
            paths.pop_front();
        }
        paths.push_back(path);
    }

    pub fn list(&self) -> Vec<PathBuf> {
        let paths = self.paths.lock().unwrap_or_else(PoisonError::into_inner);
        paths.iter().cloned().collect()
    }
}

#[derive(Debug)]
pub struct SnapshotArchive {
    dir: PathBuf,
    recent: RecentSnapshots,
}

impl SnapshotArchive {
    pub fn new(config: &ArchiveConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            recent: RecentSnapshots::new(config.recent_window),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `frame` as a dated JPEG and record it as the newest snapshot.
    ///
    /// The frame is stored as given. [`ArenaStream`](crate::ArenaStream)
    /// hands over the winning frame with detection boxes, labels and the
    /// opponent move already drawn.
    pub fn save(&mut self, frame: &RgbImage) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create archive dir: {:?}", self.dir))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S_%3f").to_string();
        let mut path = self.dir.join(format!("win_{stamp}.jpg"));
        // Two wins inside one millisecond
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("win_{stamp}_{n}.jpg"));
            n += 1;
        }
        frame
            .save(&path)
            .with_context(|| format!("Failed to save snapshot: {:?}", path))?;

        info!("winning frame saved as {}", path.display());
        self.recent.record(path.clone());
        Ok(path)
    }

    /// Handle onto the recent-snapshot list; stays valid after the archive moves.
    pub fn recent(&self) -> RecentSnapshots {
        self.recent.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rps-archive-{tag}-{}", std::process::id()))
    }

    #[test]
    fn test_ring_keeps_latest() {
        let recent = RecentSnapshots::new(2);
        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            recent.record(PathBuf::from(name));
        }
        assert_eq!(recent.list(), vec![PathBuf::from("b.jpg"), PathBuf::from("c.jpg")]);
    }

    #[test]
    fn test_zero_window_lists_nothing() {
        let recent = RecentSnapshots::new(0);
        recent.record(PathBuf::from("a.jpg"));
        assert!(recent.list().is_empty());
    }

    #[test]
    fn test_save_writes_jpeg() -> Result<()> {
        let dir = temp_dir("save");
        let mut archive = SnapshotArchive::new(&ArchiveConfig {
            dir: dir.clone(),
            recent_window: 4,
        });
        let handle = archive.recent();

        let path = archive.save(&RgbImage::new(16, 12))?;
        assert!(path.starts_with(&dir));
        assert!(path.extension().is_some_and(|ext| ext == "jpg"));
        assert_eq!(image::open(&path)?.width(), 16);
        assert_eq!(handle.list(), vec![path]);

        std::fs::remove_dir_all(dir)?;
        Ok(())
    }
}
