//! Sketchpad Application
//!
//! The application shell: tool state, toolbar and keyboard actions, and the
//! browser host driving the drawing surface.

mod app;
mod params;
mod shortcuts;
mod ui;

pub use app::{AppConfig, DEFAULT_CANVAS_ID, HostEffect, PNG_MIME, SketchApp};
pub use params::UrlParams;
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{ControlKind, TOOLBAR, ToolbarControl, UiAction, toolbar_action};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{HostError, run_wasm};
