//! Spatial assignment of detections to playing positions
//!
//! A detection belongs to Primary when its box center lies strictly left of
//! the frame midline, otherwise to Secondary. When several detections land on
//! the same position, the last one in detector order wins. No re-sorting is
//! done here; callers control the order.

use super::detector::Detection;
use crate::bbox::BBox;
use rps_core::{Move, Position};

/// At most one move per position for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionSlots {
    pub primary: Option<Move>,
    pub secondary: Option<Move>,
}

impl PositionSlots {
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }
}

/// Maps detections onto the two playing positions
pub struct SpatialAssigner;

impl SpatialAssigner {
    pub fn position_of(bbox: &BBox, frame_width: u32) -> Position {
        let midline = (frame_width / 2) as i64;
        if bbox.center_x() < midline {
            Position::Primary
        } else {
            Position::Secondary
        }
    }

    /// Assign every detection in order; later detections overwrite earlier ones.
    pub fn assign(detections: &[Detection], frame_width: u32) -> PositionSlots {
        let mut slots = PositionSlots::default();
        for detection in detections {
            let slot = match Self::position_of(&detection.bbox, frame_width) {
                Position::Primary => &mut slots.primary,
                Position::Secondary => &mut slots.secondary,
            };
            *slot = Some(detection.gesture);
        }
        slots
    }
}
