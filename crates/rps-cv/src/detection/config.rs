//! Pipeline configuration

use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Every frame is resized to this `(width, height)` before detection.
    pub frame_size: (u32, u32),
    pub jpeg_quality: u8,
    pub filter: FilterConfig,
    pub archive: ArchiveConfig,
    pub render: RenderConfig,
}

/// Cleanup applied to raw detector output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub min_confidence: f64,
    /// IoU above which duplicate boxes are suppressed. `None` disables suppression.
    pub nms_threshold: Option<f64>,
}

/// Snapshot archive configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub dir: PathBuf,
    /// How many recent snapshots stay listed.
    pub recent_window: usize,
}

/// Overlay layout. Colors are RGB; text origins are the bottom-left corner
/// of the text. Scales are OpenCV Hershey font scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub box_color: [u8; 3],
    pub box_thickness: i32,
    pub label_scale: f64,
    pub label_thickness: i32,
    /// Gap between a box's top edge and its label baseline.
    pub label_offset: i32,
    pub primary_score_origin: (i32, i32),
    pub primary_score_color: [u8; 3],
    pub secondary_score_origin: (i32, i32),
    pub secondary_score_color: [u8; 3],
    pub score_scale: f64,
    pub score_thickness: i32,
    pub opponent_origin: (i32, i32),
    pub opponent_color: [u8; 3],
    pub opponent_scale: f64,
    pub opponent_thickness: i32,
    pub winner_origin: (i32, i32),
    pub winner_color: [u8; 3],
    pub winner_scale: f64,
    pub winner_thickness: i32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            frame_size: (800, 600),
            jpeg_quality: 80,
            filter: FilterConfig::default(),
            archive: ArchiveConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            nms_threshold: None,
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            dir: "saved_rounds".into(),
            recent_window: 4,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            box_color: [0, 255, 0],
            box_thickness: 2,
            label_scale: 0.8,
            label_thickness: 2,
            label_offset: 10,
            primary_score_origin: (10, 60),
            primary_score_color: [0, 255, 255],
            secondary_score_origin: (10, 90),
            secondary_score_color: [255, 0, 255],
            score_scale: 0.9,
            score_thickness: 2,
            opponent_origin: (330, 50),
            opponent_color: [0, 0, 0],
            opponent_scale: 1.2,
            opponent_thickness: 3,
            winner_origin: (220, 300),
            winner_color: [255, 0, 0],
            winner_scale: 1.5,
            winner_thickness: 3,
        }
    }
}

impl ArenaConfig {
    /// Configuration for detectors that report weak or repeated boxes
    pub fn for_noisy_detector() -> Self {
        Self {
            filter: FilterConfig {
                min_confidence: 0.5,
                nms_threshold: Some(0.45),
            },
            ..Default::default()
        }
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse arena configuration")
    }

    /// Load a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;
        Self::from_json(&json)
    }
}
