// tests/stream_tests.rs
use image::RgbImage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rps_core::{ArenaError, GameMode, MatchSession, SessionConfig, Winner};
use rps_cv::detection::config::ArchiveConfig;
use rps_cv::{
    ArenaConfig, ArenaStream, DirectorySource, LogCues, ReplayDetector, SignalDispatcher,
    SnapshotArchive,
};
use std::fs;
use std::path::PathBuf;

fn scratch(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rps-stream-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_replayed_match_end_to_end() -> anyhow::Result<()> {
    let root = scratch("e2e");
    let frames_dir = root.join("frames");
    fs::create_dir_all(&frames_dir)?;
    for i in 0..8 {
        RgbImage::new(640, 480).save(frames_dir.join(format!("frame_{i:03}.png")))?;
    }

    // Frames are resized to 800x600 before detection, so boxes use those coordinates.
    let script = r#"[
        [{"box": [100, 200, 250, 350], "label": "Rock"}],
        [{"box": [100, 200, 250, 350], "label": "Rock"}, {"box": [550, 200, 700, 350], "label": "Scissors"}],
        [{"box": [100, 200, 250, 350], "label": "Rock"}, {"box": [550, 200, 700, 350], "label": "Scissors"}],
        [],
        [{"box": [100, 200, 250, 350], "label": "Paper"}, {"box": [550, 200, 700, 350], "label": "Rock"}],
        [],
        [{"box": [100, 200, 250, 350], "label": "Paper"}, {"box": [550, 200, 700, 350], "label": "Paper"}]
    ]"#;

    let mut config = ArenaConfig::default();
    config.archive = ArchiveConfig {
        dir: root.join("saved_rounds"),
        recent_window: 4,
    };

    let session = MatchSession::with_rng(
        SessionConfig::new(GameMode::VsHuman, 2)?,
        StdRng::seed_from_u64(3),
    )?;
    let dispatcher = SignalDispatcher::spawn(SnapshotArchive::new(&config.archive), LogCues)?;
    let recent = dispatcher.recent_snapshots();

    let mut stream = ArenaStream::new(
        DirectorySource::open(&frames_dir)?,
        ReplayDetector::from_json(script)?,
        session,
        dispatcher,
        config,
    );

    let mut output = Vec::new();
    for part in &mut stream {
        output.extend(part?);
    }

    let state = stream.snapshot();
    assert!(state.concluded);
    assert_eq!((state.primary_score, state.secondary_score), (2, 0));
    assert_eq!(state.final_winner, Some(Winner::Primary));
    // Concludes on the fifth frame; the rest are never read.
    assert_eq!(stream.frames(), 5);

    let boundaries = output.windows(9).filter(|w| w == b"--frame\r\n").count();
    assert_eq!(boundaries, 5);

    drop(stream);
    let saved = recent.list();
    assert_eq!(saved.len(), 2);
    assert!(saved.iter().all(|p| p.exists()));

    fs::remove_dir_all(root)?;
    Ok(())
}

#[test]
fn test_missing_source_is_stream_unavailable() {
    let Err(err) = DirectorySource::open("/no/such/frames") else {
        panic!("opened a missing directory");
    };
    assert!(matches!(
        err.downcast_ref::<ArenaError>(),
        Some(ArenaError::StreamUnavailable(_))
    ));
}
