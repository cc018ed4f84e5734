//! Camera module for the zoom/pan view transform.

use crate::config::SurfaceSettings;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform of the drawing surface.
///
/// The transform is applied to the canvas element as a whole (scale first,
/// then translate), so the raster itself is never resampled. The camera is
/// only consulted to map screen coordinates back into canvas-local space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in canvas pixels.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
    /// Zoom multiplier for one wheel step up.
    pub zoom_in_factor: f64,
    /// Zoom multiplier for one wheel step down.
    pub zoom_out_factor: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_settings(&SurfaceSettings::default())
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera at 100% using the zoom limits from `settings`.
    pub fn from_settings(settings: &SurfaceSettings) -> Self {
        let settings = settings.clone().sanitized();
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            zoom_in_factor: settings.zoom_in_factor,
            zoom_out_factor: settings.zoom_out_factor,
        }
    }

    /// Convert a screen point to canvas-local coordinates.
    ///
    /// `origin` is the screen position of the canvas element's top-left corner.
    pub fn screen_to_canvas(&self, screen_point: Point, origin: Point) -> Point {
        let local = screen_point - origin;
        Point::new(
            local.x / self.zoom - self.offset.x,
            local.y / self.zoom - self.offset.y,
        )
    }

    /// Convert a canvas-local point back to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point, origin: Point) -> Point {
        Point::new(
            (canvas_point.x + self.offset.x) * self.zoom + origin.x,
            (canvas_point.y + self.offset.y) * self.zoom + origin.y,
        )
    }

    /// Apply one wheel step. Scrolling down zooms out, anything else zooms in.
    ///
    /// Returns the new zoom level.
    pub fn wheel(&mut self, delta_y: f64) -> f64 {
        let factor = if delta_y > 0.0 {
            self.zoom_out_factor
        } else {
            self.zoom_in_factor
        };
        self.zoom_by(factor)
    }

    /// Multiply the zoom by `factor`, clamped to the allowed range.
    pub fn zoom_by(&mut self, factor: f64) -> f64 {
        self.zoom = (self.zoom * factor).min(self.max_zoom).max(self.min_zoom);
        self.zoom
    }

    /// Pan the camera by a delta in canvas pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// CSS transform reproducing this camera on the canvas element.
    pub fn css_transform(&self) -> String {
        format!(
            "scale({}) translate({}px, {}px)",
            self.zoom, self.offset.x, self.offset.y
        )
    }
}
