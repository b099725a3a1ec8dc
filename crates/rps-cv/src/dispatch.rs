//! Fire-and-forget signal handling
//!
//! The pipeline hands signals to [`SignalDispatcher`], which queues them for a
//! worker thread. The worker plays cues and archives winning frames; its
//! failures are logged and never reach the pipeline.

use crate::archive::{RecentSnapshots, SnapshotArchive};
use crate::traits::CuePlayer;
use crate::Result;
use anyhow::Context;
use image::RgbImage;
use log::{debug, info, warn};
use rps_core::{Signal, SignalSink};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Move,
    Win,
}

/// Cue player that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCues;

impl CuePlayer for LogCues {
    fn play(&mut self, cue: Cue) -> Result<()> {
        info!("cue: {:?}", cue);
        Ok(())
    }
}

pub struct SignalDispatcher {
    sender: Option<Sender<Signal<RgbImage>>>,
    worker: Option<JoinHandle<()>>,
    recent: RecentSnapshots,
}

impl SignalDispatcher {
    /// Start the worker thread.
    pub fn spawn<C: CuePlayer + 'static>(archive: SnapshotArchive, cues: C) -> Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let recent = archive.recent();
        let worker = thread::Builder::new()
            .name("rps-signals".to_string())
            .spawn(move || drain(receiver, archive, cues))
            .context("Failed to spawn signal worker")?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            recent,
        })
    }

    pub fn recent_snapshots(&self) -> RecentSnapshots {
        self.recent.clone()
    }
}

impl SignalSink<RgbImage> for SignalDispatcher {
    fn emit(&mut self, signal: Signal<RgbImage>) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(signal).is_err() {
            warn!("signal worker stopped, dropping signal");
        }
    }
}

impl Drop for SignalDispatcher {
    /// Flush queued signals and wait for the worker.
    fn drop(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("signal worker panicked");
            }
        }
    }
}

fn drain<C: CuePlayer>(receiver: Receiver<Signal<RgbImage>>, mut archive: SnapshotArchive, mut cues: C) {
    for signal in receiver {
        match signal {
            Signal::Move => {
                if let Err(e) = cues.play(Cue::Move) {
                    warn!("move cue failed: {e:#}");
                }
            }
            Signal::RoundWon { winner, frame } => {
                debug!("round won by {:?}", winner);
                if let Err(e) = cues.play(Cue::Win) {
                    warn!("win cue failed: {e:#}");
                }
                if let Err(e) = archive.save(&frame) {
                    warn!("snapshot not saved: {e:#}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::config::ArchiveConfig;
    use anyhow::anyhow;
    use rps_core::Position;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        played: Arc<Mutex<Vec<Cue>>>,
        fail: bool,
    }

    impl CuePlayer for Recorder {
        fn play(&mut self, cue: Cue) -> Result<()> {
            self.played.lock().unwrap().push(cue);
            if self.fail {
                return Err(anyhow!("no audio device"));
            }
            Ok(())
        }
    }

    fn archive(tag: &str) -> (SnapshotArchive, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("rps-dispatch-{tag}-{}", std::process::id()));
        let archive = SnapshotArchive::new(&ArchiveConfig {
            dir: dir.clone(),
            recent_window: 4,
        });
        (archive, dir)
    }

    #[test]
    fn test_signals_reach_cues_and_archive() -> Result<()> {
        let (archive, dir) = archive("ok");
        let recorder = Recorder::default();
        let mut dispatcher = SignalDispatcher::spawn(archive, recorder.clone())?;
        let recent = dispatcher.recent_snapshots();

        dispatcher.emit(Signal::Move);
        dispatcher.emit(Signal::RoundWon {
            winner: Position::Primary,
            frame: RgbImage::new(8, 8),
        });
        drop(dispatcher);

        assert_eq!(*recorder.played.lock().unwrap(), vec![Cue::Move, Cue::Win]);
        assert_eq!(recent.list().len(), 1);
        assert!(recent.list()[0].exists());

        std::fs::remove_dir_all(dir)?;
        Ok(())
    }

    #[test]
    fn test_cue_failures_do_not_stop_archiving() -> Result<()> {
        let (archive, dir) = archive("fail");
        let recorder = Recorder {
            fail: true,
            ..Default::default()
        };
        let mut dispatcher = SignalDispatcher::spawn(archive, recorder.clone())?;
        let recent = dispatcher.recent_snapshots();

        dispatcher.emit(Signal::RoundWon {
            winner: Position::Secondary,
            frame: RgbImage::new(8, 8),
        });
        drop(dispatcher);

        assert_eq!(*recorder.played.lock().unwrap(), vec![Cue::Win]);
        assert_eq!(recent.list().len(), 1);

        std::fs::remove_dir_all(dir)?;
        Ok(())
    }
}
