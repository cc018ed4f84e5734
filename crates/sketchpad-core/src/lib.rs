//! Sketchpad Core Library
//!
//! Platform-agnostic drawing surface for the Sketchpad freehand drawing app:
//! raster strokes, long-press shape detection, undo history, view transform
//! and PNG export.

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod raster;
pub mod shapes;
pub mod surface;
pub mod timer;
pub mod tools;

pub use camera::Camera;
pub use color::{ColorParseError, SerializableColor};
pub use config::SurfaceSettings;
pub use error::{SurfaceError, SurfaceResult};
pub use history::UndoHistory;
pub use input::{Modifiers, MousePhase, PointerEvent, TouchPhase};
pub use raster::{Raster, RasterSnapshot};
pub use shapes::{DetectedShape, ShapeKind, classify};
pub use surface::{DrawingSurface, GestureState, SurfaceResponse};
pub use timer::{Instant, TimerCommand, TimerId};
pub use tools::{ToolConfig, ToolKind};
