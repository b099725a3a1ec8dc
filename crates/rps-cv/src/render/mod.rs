//! Frame annotation
//!
//! Rendering is a pure function of the frame, the scoreboard and what was
//! detected on that frame. The overlay is first planned as a list of
//! [`Annotation`]s and then painted with OpenCV.

use crate::bbox::BBox;
use crate::detection::config::RenderConfig;
use crate::detection::Detection;
use crate::utils::ImageUtils;
use crate::Result;
use image::{Rgb, RgbImage};
use opencv::{
    core::{Point, Scalar},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
};
use rps_core::{GameMode, MatchState, Move};

/// One overlay element, already in frame coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Box {
        bbox: BBox,
        color: Rgb<u8>,
        thickness: i32,
    },
    Text {
        text: String,
        origin: (i32, i32),
        scale: f64,
        thickness: i32,
        color: Rgb<u8>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    config: RenderConfig,
}

impl FrameRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Detection boxes with their labels, plus the synthetic opponent's move
    /// when playing against it. Boxes are clamped to `frame_size`.
    pub fn overlay(
        &self,
        mode: GameMode,
        detections: &[Detection],
        opponent_move: Option<Move>,
        frame_size: (u32, u32),
    ) -> Vec<Annotation> {
        let cfg = &self.config;
        let mut plan = Vec::new();

        for detection in detections {
            let bbox = detection.bbox.clamped(frame_size.0, frame_size.1);
            plan.push(Annotation::Box {
                bbox,
                color: Rgb(cfg.box_color),
                thickness: cfg.box_thickness,
            });
            plan.push(Annotation::Text {
                text: detection.gesture.to_string(),
                origin: (bbox.x, bbox.y - cfg.label_offset),
                scale: cfg.label_scale,
                thickness: cfg.label_thickness,
                color: Rgb(cfg.box_color),
            });
        }

        if let (GameMode::VsSynthetic, Some(opponent)) = (mode, opponent_move) {
            plan.push(Annotation::Text {
                text: format!("AI Move: {opponent}"),
                origin: cfg.opponent_origin,
                scale: cfg.opponent_scale,
                thickness: cfg.opponent_thickness,
                color: Rgb(cfg.opponent_color),
            });
        }

        plan
    }

    /// Plan the full overlay for one frame of `frame_size`.
    ///
    /// A concluded match shows only the winner text. Otherwise the detection
    /// overlay is followed by both scores.
    pub fn annotations(
        &self,
        state: &MatchState,
        detections: Option<&[Detection]>,
        opponent_move: Option<Move>,
        frame_size: (u32, u32),
    ) -> Vec<Annotation> {
        let cfg = &self.config;

        if state.concluded {
            return state
                .final_winner
                .map(|winner| Annotation::Text {
                    text: winner.to_string(),
                    origin: cfg.winner_origin,
                    scale: cfg.winner_scale,
                    thickness: cfg.winner_thickness,
                    color: Rgb(cfg.winner_color),
                })
                .into_iter()
                .collect();
        }

        let mut plan = self.overlay(
            state.mode,
            detections.unwrap_or_default(),
            opponent_move,
            frame_size,
        );
        plan.push(Annotation::Text {
            text: format!("Player 1: {}", state.primary_score),
            origin: cfg.primary_score_origin,
            scale: cfg.score_scale,
            thickness: cfg.score_thickness,
            color: Rgb(cfg.primary_score_color),
        });
        plan.push(Annotation::Text {
            text: format!("{}: {}", state.mode.secondary_label(), state.secondary_score),
            origin: cfg.secondary_score_origin,
            scale: cfg.score_scale,
            thickness: cfg.score_thickness,
            color: Rgb(cfg.secondary_score_color),
        });
        plan
    }

    /// Paint the full overlay onto `frame` in place.
    pub fn render(
        &self,
        frame: &mut RgbImage,
        state: &MatchState,
        detections: Option<&[Detection]>,
        opponent_move: Option<Move>,
    ) -> Result<()> {
        let plan = self.annotations(state, detections, opponent_move, frame.dimensions());
        paint(frame, &plan)
    }

    /// Paint only the detection overlay, without scores.
    pub fn render_overlay(
        &self,
        frame: &mut RgbImage,
        mode: GameMode,
        detections: &[Detection],
        opponent_move: Option<Move>,
    ) -> Result<()> {
        let plan = self.overlay(mode, detections, opponent_move, frame.dimensions());
        paint(frame, &plan)
    }
}

fn paint(frame: &mut RgbImage, plan: &[Annotation]) -> Result<()> {
    if plan.is_empty() {
        return Ok(());
    }

    let mut mat = ImageUtils::rgb_to_mat(frame)?;
    for annotation in plan {
        match annotation {
            Annotation::Box {
                bbox,
                color,
                thickness,
            } => {
                let (x1, y1, x2, y2) = bbox.corners();
                imgproc::rectangle_points(
                    &mut mat,
                    Point::new(x1, y1),
                    Point::new(x2, y2),
                    scalar(*color),
                    *thickness,
                    LINE_8,
                    0,
                )?;
            }
            Annotation::Text {
                text,
                origin,
                scale,
                thickness,
                color,
            } => {
                imgproc::put_text(
                    &mut mat,
                    text,
                    Point::new(origin.0, origin.1),
                    FONT_HERSHEY_SIMPLEX,
                    *scale,
                    scalar(*color),
                    *thickness,
                    LINE_8,
                    false,
                )?;
            }
        }
    }

    *frame = ImageUtils::mat_to_rgb(&mat)?;
    Ok(())
}

// The Mat keeps RGB order, so channels map straight across.
fn scalar(Rgb([r, g, b]): Rgb<u8>) -> Scalar {
    Scalar::new(r as f64, g as f64, b as f64, 0.0)
}
