//! Bounding box geometry and non-maximum suppression
//!
//! Boxes come straight from the gesture detector and are not trusted to lie
//! inside the frame; clamp them before drawing.

use serde::{Deserialize, Serialize};

/// Axis-aligned detection box with the detector's confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f64,
}

impl BBox {
    /// Create a new bounding box
    pub fn new(x: i32, y: i32, width: i32, height: i32, confidence: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            confidence,
        }
    }

    /// Create from `(x1, y1)` / `(x2, y2)` corners, in either order
    ///
    /// Extents too large for `i32` saturate.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32, confidence: f64) -> Self {
        let (left, right) = (x1.min(x2), x1.max(x2));
        let (top, bottom) = (y1.min(y2), y1.max(y2));
        Self::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
            confidence,
        )
    }

    /// `(x1, y1, x2, y2)`, saturating at the `i32` range
    pub fn corners(&self) -> (i32, i32, i32, i32) {
        (
            self.x,
            self.y,
            self.x.saturating_add(self.width),
            self.y.saturating_add(self.height),
        )
    }

    /// Calculate area of the bounding box
    pub fn area(&self) -> f64 {
        (self.width.max(0) as f64) * (self.height.max(0) as f64)
    }

    /// Horizontal center, `(x1 + x2) / 2` rounded toward negative infinity
    pub fn center_x(&self) -> i64 {
        let (x1, _, x2, _) = self.corners();
        (x1 as i64 + x2 as i64).div_euclid(2)
    }

    /// Calculate intersection over union (IoU) with another box
    pub fn iou(&self, other: &BBox) -> f64 {
        let (ax1, ay1, ax2, ay2) = self.corners();
        let (bx1, by1, bx2, by2) = other.corners();
        let x1 = ax1.max(bx1);
        let y1 = ay1.max(by1);
        let x2 = ax2.min(bx2);
        let y2 = ay2.min(by2);

        if x2 <= x1 || y2 <= y1 {
            return 0.0;
        }

        let intersection = (x2 as f64 - x1 as f64) * (y2 as f64 - y1 as f64);
        let union = self.area() + other.area() - intersection;

        intersection / union
    }

    /// Check if this box overlaps with another
    pub fn overlaps(&self, other: &BBox, threshold: f64) -> bool {
        self.iou(other) > threshold
    }

    /// Copy of this box with every corner pulled inside a `width` x `height` frame
    pub fn clamped(&self, width: u32, height: u32) -> BBox {
        let max_x = (width as i32 - 1).max(0);
        let max_y = (height as i32 - 1).max(0);
        let (x1, y1, x2, y2) = self.corners();
        BBox::from_corners(
            x1.clamp(0, max_x),
            y1.clamp(0, max_y),
            x2.clamp(0, max_x),
            y2.clamp(0, max_y),
            self.confidence,
        )
    }
}

/// Collection of bounding boxes with batch operations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BBoxCollection {
    boxes: Vec<BBox>,
}

impl BBoxCollection {
    /// Create from vector of boxes
    pub fn from_vec(boxes: Vec<BBox>) -> Self {
        Self { boxes }
    }

    /// Get number of boxes
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Indices that survive non-maximum suppression, in ascending input order
    ///
    /// Boxes are visited by descending confidence; ties keep input order.
    pub fn nms_indices(&self, threshold: f64) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.boxes.len()).collect();
        order.sort_by(|&a, &b| {
            self.boxes[b]
                .confidence
                .total_cmp(&self.boxes[a].confidence)
        });

        let mut keep = Vec::new();
        let mut suppressed = vec![false; self.boxes.len()];

        for (rank, &i) in order.iter().enumerate() {
            if suppressed[i] {
                continue;
            }
            keep.push(i);

            // Suppress overlapping boxes
            for &j in &order[rank + 1..] {
                if !suppressed[j] && self.boxes[i].overlaps(&self.boxes[j], threshold) {
                    suppressed[j] = true;
                }
            }
        }

        keep.sort_unstable();
        keep
    }
}

impl FromIterator<BBox> for BBoxCollection {
    fn from_iter<T: IntoIterator<Item = BBox>>(iter: T) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_iou() {
        let box1 = BBox::new(0, 0, 10, 10, 0.9);
        let box2 = BBox::new(5, 5, 10, 10, 0.8);

        let iou = box1.iou(&box2);
        assert!(iou > 0.0 && iou < 1.0);
        assert_eq!(box1.iou(&BBox::new(50, 50, 5, 5, 0.1)), 0.0);
    }

    #[test]
    fn test_center_matches_corner_midpoint() {
        let bbox = BBox::from_corners(101, 0, 300, 50, 1.0);
        assert_eq!(bbox.center_x(), (101 + 300) / 2);
        assert_eq!(BBox::from_corners(-7, 0, 0, 10, 1.0).center_x(), -4);
    }

    #[test]
    fn test_from_corners_normalizes_order() {
        let bbox = BBox::from_corners(40, 30, 10, 5, 0.5);
        assert_eq!(bbox.corners(), (10, 5, 40, 30));
    }

    #[test]
    fn test_clamped_stays_in_frame() {
        let bbox = BBox::from_corners(-50, -20, 900, 700, 0.7).clamped(800, 600);
        assert_eq!(bbox.corners(), (0, 0, 799, 599));
        assert_eq!(bbox.confidence, 0.7);

        let outside = BBox::from_corners(1000, 10, 1200, 40, 0.7).clamped(800, 600);
        assert_eq!(outside.corners(), (799, 10, 799, 40));
    }

    #[test]
    fn test_extreme_corners_do_not_overflow() {
        let wide = BBox::from_corners(i32::MIN, 0, i32::MAX, 10, 1.0);
        assert_eq!(wide.width, i32::MAX);
        assert_eq!(wide.corners(), (i32::MIN, 0, -1, 10));
        assert!(wide.center_x() < 0);
        assert_eq!(wide.clamped(800, 600).corners().0, 0);

        let far = BBox::from_corners(2_000_000_000, 0, 2_100_000_000, 10, 1.0);
        assert_eq!(far.center_x(), 2_050_000_000);
        assert_eq!(far.corners().2, 2_100_000_000);
        assert_eq!(far.iou(&wide), 0.0);
        assert!(wide.iou(&wide) > 0.0);
    }

    #[test]
    fn test_nms() {
        let collection = BBoxCollection::from_vec(vec![
            BBox::new(0, 0, 10, 10, 0.8),
            BBox::new(2, 2, 10, 10, 0.9),
            BBox::new(20, 20, 10, 10, 0.7),
        ]);
        assert_eq!(collection.len(), 3);

        // Highest confidence of the overlapping pair survives, input order is kept.
        assert_eq!(collection.nms_indices(0.5), vec![1, 2]);
    }

    #[test]
    fn test_nms_on_nothing() {
        let collection: BBoxCollection = std::iter::empty().collect();
        assert!(collection.is_empty());
        assert!(collection.nms_indices(0.5).is_empty());
    }
}
