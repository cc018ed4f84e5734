//! Long-press shape classification.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Bounding boxes with an aspect ratio below this are treated as circles.
pub const CIRCLE_MAX_RATIO: f64 = 1.2;
/// Bounding boxes with an aspect ratio above this are treated as lines.
pub const LINE_MIN_RATIO: f64 = 2.0;

/// Primitive recognized from a long-press gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Line,
}

impl ShapeKind {
    /// Get display name for this shape.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Line => "Line",
        }
    }
}

/// Classify the gesture spanned by `start` and `end`.
///
/// Only the aspect ratio of the bounding box matters. A box with zero extent
/// on either axis is a line.
pub fn classify(start: Point, end: Point) -> ShapeKind {
    let dx = (end.x - start.x).abs();
    let dy = (end.y - start.y).abs();
    let short = dx.min(dy);
    let long = dx.max(dy);

    if short == 0.0 {
        return ShapeKind::Line;
    }

    let ratio = long / short;
    if ratio < CIRCLE_MAX_RATIO {
        ShapeKind::Circle
    } else if ratio > LINE_MIN_RATIO {
        ShapeKind::Line
    } else {
        ShapeKind::Rectangle
    }
}
