//! Tunable settings of the drawing surface.

use crate::error::SurfaceResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long a gesture must be held before it becomes eligible for shape detection.
pub const DEFAULT_LONG_PRESS_MS: u64 = 1000;

/// Maximum number of undo snapshots to keep.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// File name offered for PNG downloads.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "drawing.png";

/// Surface behavior settings. Every field has a default, so partial JSON is
/// accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Long-press delay in milliseconds.
    pub long_press_ms: u64,
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Zoom multiplier when scrolling up.
    pub zoom_in_factor: f64,
    /// Zoom multiplier when scrolling down.
    pub zoom_out_factor: f64,
    /// Undo snapshots kept before the oldest is evicted. Never below 1.
    pub history_limit: usize,
    /// Download name for exported images.
    pub export_file_name: String,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            min_zoom: 0.1,
            max_zoom: 5.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            history_limit: DEFAULT_HISTORY_LIMIT,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl SurfaceSettings {
    /// Parse settings from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> SurfaceResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Serialize the settings to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    /// Repair values that would break surface invariants.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.min_zoom > 0.0 && self.min_zoom.is_finite()) {
            log::warn!("Ignoring invalid min_zoom {}", self.min_zoom);
            self.min_zoom = defaults.min_zoom;
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            log::warn!("Ignoring invalid max_zoom {}", self.max_zoom);
            self.max_zoom = defaults.max_zoom.max(self.min_zoom);
        }
        if !(self.zoom_in_factor > 0.0 && self.zoom_in_factor.is_finite()) {
            self.zoom_in_factor = defaults.zoom_in_factor;
        }
        if !(self.zoom_out_factor > 0.0 && self.zoom_out_factor.is_finite()) {
            self.zoom_out_factor = defaults.zoom_out_factor;
        }
        self.history_limit = self.history_limit.max(1);
        if self.export_file_name.trim().is_empty() {
            self.export_file_name = defaults.export_file_name;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SurfaceSettings::default();
        assert_eq!(settings.long_press_delay(), Duration::from_millis(1000));
        assert_eq!(settings.history_limit, 50);
        assert_eq!(settings.export_file_name, "drawing.png");
    }

    #[test]
    fn test_partial_json() {
        let settings = SurfaceSettings::from_json(r#"{"long_press_ms": 500}"#).unwrap();
        assert_eq!(settings.long_press_ms, 500);
        assert!((settings.max_zoom - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sanitize_bad_values() {
        let settings = SurfaceSettings::from_json(
            r#"{"min_zoom": -1.0, "max_zoom": 0.01, "history_limit": 0, "export_file_name": " "}"#,
        )
        .unwrap();
        assert!((settings.min_zoom - 0.1).abs() < f64::EPSILON);
        assert!(settings.max_zoom >= settings.min_zoom);
        assert_eq!(settings.history_limit, 1);
        assert_eq!(settings.export_file_name, "drawing.png");
    }

    #[test]
    fn test_invalid_json() {
        assert!(SurfaceSettings::from_json("{not json").is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = SurfaceSettings::default();
        let json = settings.to_json().unwrap();
        assert_eq!(SurfaceSettings::from_json(&json).unwrap(), settings);
    }
}
