//! Shape recognition for long-press gestures.

mod classify;
mod primitive;

pub use classify::{CIRCLE_MAX_RATIO, LINE_MIN_RATIO, ShapeKind, classify};
pub use primitive::DetectedShape;
