//! Tool configuration for the drawing surface.

use crate::color::SerializableColor;
use serde::{Deserialize, Serialize};

/// Smallest stroke width the toolbar offers.
pub const MIN_STROKE_WIDTH: f64 = 1.0;
/// Largest stroke width the toolbar offers.
pub const MAX_STROKE_WIDTH: f64 = 50.0;
/// Stroke width used before the user touches the slider.
pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
}

impl ToolKind {
    /// Get display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Eraser => "Eraser",
        }
    }

    /// Parse a tool from its lowercase identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pen" => Some(ToolKind::Pen),
            "eraser" => Some(ToolKind::Eraser),
            _ => None,
        }
    }
}

/// User-selected drawing parameters.
///
/// This is an immutable value passed into every surface interaction. The
/// `with_*` methods return an updated copy; the surface never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Currently selected tool.
    pub tool: ToolKind,
    /// Pen color.
    pub stroke_color: SerializableColor,
    /// Stroke width in canvas pixels.
    pub stroke_width: f64,
    /// Canvas background color, also used as the eraser color.
    pub background_color: SerializableColor,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pen,
            stroke_color: SerializableColor::black(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            background_color: SerializableColor::white(),
        }
    }
}

impl ToolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, tool: ToolKind) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_stroke_color(mut self, color: SerializableColor) -> Self {
        self.stroke_color = color;
        self
    }

    /// Set the stroke width, clamped to the toolbar range.
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = clamp_stroke_width(width);
        self
    }

    pub fn with_background_color(mut self, color: SerializableColor) -> Self {
        self.background_color = color;
        self
    }

    /// Color used for freehand strokes: the background when erasing.
    pub fn freehand_color(&self) -> SerializableColor {
        match self.tool {
            ToolKind::Pen => self.stroke_color,
            ToolKind::Eraser => self.background_color,
        }
    }

    /// Stroke width guaranteed to be inside the toolbar range, even for
    /// values that arrived through deserialization.
    pub fn effective_stroke_width(&self) -> f64 {
        clamp_stroke_width(self.stroke_width)
    }
}

fn clamp_stroke_width(width: f64) -> f64 {
    if width.is_nan() {
        return DEFAULT_STROKE_WIDTH;
    }
    width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
}
