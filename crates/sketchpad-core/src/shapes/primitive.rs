//! Geometry of a recognized shape.

use super::classify::{ShapeKind, classify};
use kurbo::{BezPath, Circle, Line, Point, Rect, Shape};

/// Flattening tolerance used when converting curves to paths.
const PATH_TOLERANCE: f64 = 0.1;

/// A classified gesture together with the two points it was classified from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedShape {
    pub kind: ShapeKind,
    pub start: Point,
    pub end: Point,
}

impl DetectedShape {
    /// Classify `start`/`end` and keep the anchors for drawing.
    pub fn detect(start: Point, end: Point) -> Self {
        Self {
            kind: classify(start, end),
            start,
            end,
        }
    }

    /// Circle through the gesture: centered on the midpoint, with the
    /// start-to-end distance as its diameter.
    pub fn circle(&self) -> Circle {
        Circle::new(self.start.midpoint(self.end), self.start.distance(self.end) / 2.0)
    }

    /// Axis-aligned rectangle with corners at the two anchors.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    pub fn line(&self) -> Line {
        Line::new(self.start, self.end)
    }

    /// Outline path to stroke onto the raster.
    pub fn to_path(&self) -> BezPath {
        match self.kind {
            ShapeKind::Circle => self.circle().to_path(PATH_TOLERANCE),
            ShapeKind::Rectangle => self.rect().to_path(PATH_TOLERANCE),
            ShapeKind::Line => self.line().to_path(PATH_TOLERANCE),
        }
    }

    /// Bounding box of the outline before stroking.
    pub fn bounds(&self) -> Rect {
        match self.kind {
            ShapeKind::Circle => self.circle().bounding_box(),
            ShapeKind::Rectangle | ShapeKind::Line => self.rect(),
        }
    }
}
