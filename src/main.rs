use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rps_core::{GameMode, MatchSession, SessionConfig};
use rps_cv::traits::FrameSource;
use rps_cv::{
    ArenaConfig, ArenaStream, CameraSource, DirectorySource, LogCues, ReplayDetector,
    SignalDispatcher, SnapshotArchive,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Adjudicate a Rock-Paper-Scissors match from a stream of frames
#[derive(Parser, Debug)]
#[command(name = "rps-arena", version)]
struct Args {
    /// vs-synthetic (computer) or vs-human
    #[arg(long, default_value = "vs-synthetic")]
    mode: GameMode,

    /// Round wins needed to take the match
    #[arg(long, visible_alias = "best-of", default_value_t = 3)]
    target: u32,

    /// Directory of frames to replay, in file-name order
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Webcam index to capture from
    #[arg(long, conflicts_with = "frames")]
    camera: Option<i32>,

    /// JSON script of per-frame detections
    #[arg(long)]
    detections: Option<PathBuf>,

    /// JSON pipeline configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the multipart JPEG stream, `-` for stdout
    #[arg(long, default_value = "-")]
    output: String,

    /// Seed for the synthetic opponent
    #[arg(long)]
    seed: Option<u64>,
}

fn open_source(args: &Args) -> Result<Box<dyn FrameSource>> {
    match (&args.frames, args.camera) {
        (Some(dir), _) => Ok(Box::new(DirectorySource::open(dir)?)),
        (None, Some(index)) => Ok(Box::new(CameraSource::open(index)?)),
        (None, None) => bail!("no frame source given, pass --frames <dir> or --camera <index>"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Rejected before any frame is touched
    let session_config = SessionConfig::new(args.mode, args.target)?;
    let config = match &args.config {
        Some(path) => ArenaConfig::from_file(path)?,
        None => ArenaConfig::default(),
    };

    let detector = match &args.detections {
        Some(path) => ReplayDetector::from_file(path)?,
        None => {
            warn!("no detection script given, every frame will be empty");
            ReplayDetector::default()
        }
    };

    let source = open_source(&args)?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = MatchSession::with_rng(session_config, rng)?;

    let archive = SnapshotArchive::new(&config.archive);
    info!("saving winning frames under {}", archive.dir().display());
    let dispatcher = SignalDispatcher::spawn(archive, LogCues)?;

    let mut out: Box<dyn Write> = if args.output == "-" {
        Box::new(io::stdout().lock())
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("Failed to create output: {}", args.output))?;
        Box::new(BufWriter::new(file))
    };

    let mut stream = ArenaStream::new(source, detector, session, dispatcher, config);
    for part in &mut stream {
        out.write_all(&part?).context("Stream consumer went away")?;
    }
    out.flush()?;

    info!("final state: {}", serde_json::to_string(&stream.snapshot())?);
    for path in stream.signals().recent_snapshots().list() {
        info!("recent snapshot: {}", path.display());
    }
    Ok(())
}
