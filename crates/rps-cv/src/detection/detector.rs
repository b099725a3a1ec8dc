//! Detector boundary
//!
//! The gesture model itself lives outside this crate. Anything implementing
//! [`GestureDetector`](crate::traits::GestureDetector) can feed the pipeline;
//! [`ReplayDetector`] replays a recorded script of detections.

use super::config::FilterConfig;
use crate::bbox::{BBox, BBoxCollection};
use crate::traits::GestureDetector;
use crate::Result;
use anyhow::{anyhow, Context};
use image::RgbImage;
use rps_core::Move;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

/// One classified hand on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BBox,
    pub gesture: Move,
}

impl Detection {
    pub fn new(bbox: BBox, gesture: Move) -> Self {
        Self { bbox, gesture }
    }

    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32, gesture: Move) -> Self {
        Self::new(BBox::from_corners(x1, y1, x2, y2, 1.0), gesture)
    }
}

/// Drop weak detections and, if configured, duplicates.
///
/// Survivors keep the detector's order, which decides collisions later on.
pub fn filter_detections(mut detections: Vec<Detection>, config: &FilterConfig) -> Vec<Detection> {
    detections.retain(|d| d.bbox.confidence >= config.min_confidence);

    let Some(threshold) = config.nms_threshold else {
        return detections;
    };

    let boxes: BBoxCollection = detections.iter().map(|d| d.bbox).collect();
    boxes
        .nms_indices(threshold)
        .into_iter()
        .map(|i| detections[i])
        .collect()
}

/// A scripted box: `{"box": [x1, y1, x2, y2], "label": "Rock", "confidence": 0.9}`.
/// `"class"` with the model's class id may replace `"label"`.
#[derive(Debug, Deserialize)]
struct ScriptedBox {
    #[serde(rename = "box")]
    corners: [i32; 4],
    label: Option<String>,
    class: Option<usize>,
    #[serde(default = "full_confidence")]
    confidence: f64,
}

fn full_confidence() -> f64 {
    1.0
}

impl ScriptedBox {
    fn into_detection(self) -> Result<Detection> {
        let gesture = match (self.label, self.class) {
            (Some(label), _) => label.parse::<Move>()?,
            (None, Some(class)) => {
                Move::from_class_index(class).ok_or_else(|| anyhow!("unknown class id {class}"))?
            }
            (None, None) => return Err(anyhow!("scripted box has neither label nor class")),
        };
        let [x1, y1, x2, y2] = self.corners;
        Ok(Detection::new(
            BBox::from_corners(x1, y1, x2, y2, self.confidence),
            gesture,
        ))
    }
}

/// Replays recorded detections, one entry per frame.
///
/// Frames past the end of the script get no detections.
#[derive(Debug, Clone, Default)]
pub struct ReplayDetector {
    frames: VecDeque<Vec<Detection>>,
}

impl ReplayDetector {
    pub fn new(frames: Vec<Vec<Detection>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// Parse a script: a JSON array with one array of boxes per frame.
    pub fn from_json(json: &str) -> Result<Self> {
        let script: Vec<Vec<ScriptedBox>> =
            serde_json::from_str(json).context("Failed to parse detection script")?;

        let frames = script
            .into_iter()
            .enumerate()
            .map(|(index, boxes)| {
                boxes
                    .into_iter()
                    .map(ScriptedBox::into_detection)
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("Invalid detection on scripted frame {index}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(frames))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read detection script: {:?}", path.as_ref()))?;
        Self::from_json(&json)
    }

    /// Scripted frames not yet replayed
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl GestureDetector for ReplayDetector {
    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<Detection>> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}
