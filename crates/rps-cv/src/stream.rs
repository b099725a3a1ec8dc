//! Frame pipeline
//!
//! One frame at a time, strictly in arrival order: read, resize, detect,
//! assign positions, play the frame into the session, draw with OpenCV,
//! encode. The next
//! frame is not pulled until the current one has been handed out.
//!
//! The stream ends when the source runs dry or fails to read, after the
//! frame that concludes the match, or after a detector error (which is
//! yielded first). Dropping the stream cancels it.

use crate::detection::{filter_detections, ArenaConfig, SpatialAssigner};
use crate::render::FrameRenderer;
use crate::traits::{FrameSource, GestureDetector};
use crate::utils::ImageUtils;
use crate::Result;
use image::RgbImage;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use rps_core::{MatchSession, MatchState, SignalSink};

/// Multipart boundary between encoded frames.
pub const BOUNDARY: &str = "frame";

/// Content type of the encoded stream.
pub const CONTENT_TYPE: &str = "multipart/x-mixed-replace; boundary=frame";

/// Wrap one JPEG as a multipart part.
pub fn multipart_part(jpeg: &[u8]) -> Vec<u8> {
    let header = format!("--{BOUNDARY}\r\nContent-Type: image/jpeg\r\n\r\n");
    let mut part = Vec::with_capacity(header.len() + jpeg.len() + 2);
    part.extend_from_slice(header.as_bytes());
    part.extend_from_slice(jpeg);
    part.extend_from_slice(b"\r\n");
    part
}

pub struct ArenaStream<S, D, K, R = StdRng> {
    source: S,
    detector: D,
    signals: K,
    session: MatchSession<R>,
    renderer: FrameRenderer,
    config: ArenaConfig,
    finished: bool,
    frames: u64,
}

impl<S, D, K, R> ArenaStream<S, D, K, R>
where
    S: FrameSource,
    D: GestureDetector,
    K: SignalSink<RgbImage>,
    R: Rng,
{
    pub fn new(source: S, detector: D, session: MatchSession<R>, signals: K, config: ArenaConfig) -> Self {
        Self {
            source,
            detector,
            signals,
            session,
            renderer: FrameRenderer::new(config.render.clone()),
            config,
            finished: false,
            frames: 0,
        }
    }

    pub fn session(&self) -> &MatchSession<R> {
        &self.session
    }

    /// Scoreboard as of the last processed frame.
    pub fn snapshot(&self) -> MatchState {
        self.session.snapshot()
    }

    pub fn signals(&self) -> &K {
        &self.signals
    }

    /// Frames processed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run one raw frame through detection, the session and the renderer.
    ///
    /// A frame that may decide the round is judged on a copy carrying the
    /// detection overlay, so a round-won snapshot shows the boxes, labels and
    /// opponent move but not the scores.
    pub fn process(&mut self, frame: RgbImage) -> Result<RgbImage> {
        let mut frame = ImageUtils::fit(frame, self.config.frame_size);
        self.frames += 1;

        if self.session.is_concluded() {
            let state = self.session.snapshot();
            self.renderer.render(&mut frame, &state, None, None)?;
            return Ok(frame);
        }

        let raw = self.detector.detect(&frame)?;
        let detections = filter_detections(raw, &self.config.filter);
        let slots = SpatialAssigner::assign(&detections, frame.width());

        let secondary = self
            .session
            .secondary_move(slots.primary, slots.secondary, &mut self.signals);
        let opponent = slots.primary.and(self.session.opponent_move());

        let deciding =
            slots.primary.is_some() && secondary.is_some() && !self.session.round().is_settled();
        let state = if deciding {
            let mut snapshot = frame.clone();
            let mode = self.session.config().mode;
            self.renderer
                .render_overlay(&mut snapshot, mode, &detections, opponent)?;
            self.session
                .advance(slots.primary, secondary, &snapshot, &mut self.signals)
        } else {
            self.session
                .advance(slots.primary, secondary, &frame, &mut self.signals)
        };

        let shown = (!state.concluded).then_some(detections.as_slice());
        self.renderer.render(&mut frame, &state, shown, opponent)?;

        Ok(frame)
    }

    /// Pull, process and return the next annotated frame.
    pub fn next_frame(&mut self) -> Option<Result<RgbImage>> {
        if self.finished {
            return None;
        }

        let raw = match self.source.read() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                info!("frame source closed after {} frames", self.frames);
                self.finished = true;
                return None;
            }
            Err(e) => {
                warn!("frame read failed, ending stream: {e:#}");
                self.finished = true;
                return None;
            }
        };

        let result = self.process(raw);
        if result.is_err() || self.session.is_concluded() {
            self.finished = true;
        }
        Some(result)
    }
}

impl<S, D, K, R> Iterator for ArenaStream<S, D, K, R>
where
    S: FrameSource,
    D: GestureDetector,
    K: SignalSink<RgbImage>,
    R: Rng,
{
    type Item = Result<Vec<u8>>;

    /// Next frame as an encoded multipart part.
    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.next_frame()?;
        let quality = self.config.jpeg_quality;
        Some(frame.and_then(|f| ImageUtils::encode_jpeg(&f, quality)).map(|jpeg| multipart_part(&jpeg)))
    }
}
