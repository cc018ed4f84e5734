//! Application controller tying the drawing surface to tool state and host
//! effects.

use crate::shortcuts::ShortcutRegistry;
use crate::ui::UiAction;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use sketchpad_core::{
    DrawingSurface, Instant, Modifiers, PointerEvent, SurfaceError, SurfaceResponse, SurfaceResult,
    SurfaceSettings, TimerCommand, TimerId, ToolConfig,
};
use std::time::Duration;

/// Element id of the drawing canvas.
pub const DEFAULT_CANVAS_ID: &str = "sketchpad-canvas";

/// MIME type of exported images.
pub const PNG_MIME: &str = "image/png";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas_id: String,
    pub settings: SurfaceSettings,
    pub tools: ToolConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            settings: SurfaceSettings::default(),
            tools: ToolConfig::default(),
        }
    }
}

/// Side effects the host has to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEffect {
    /// Call back [`SketchApp::on_timer`] with `id` after `delay`.
    ScheduleTimer { id: TimerId, delay: Duration },
    /// Drop a previously scheduled timer.
    CancelTimer(TimerId),
    /// Offer `bytes` to the user as a file download.
    Download {
        file_name: String,
        mime: &'static str,
        bytes: Vec<u8>,
    },
    /// Present the raster again.
    Redraw,
    /// Apply a CSS transform to the canvas element.
    ApplyTransform(String),
}

/// The sketchpad application state.
pub struct SketchApp {
    surface: DrawingSurface,
    tools: ToolConfig,
    config: AppConfig,
}

impl SketchApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            surface: DrawingSurface::new(config.settings.clone()),
            tools: config.tools,
            config,
        }
    }

    /// Allocate the raster for a canvas of the given size.
    pub fn mount(&mut self, width: u32, height: u32) -> SurfaceResult<Vec<HostEffect>> {
        let response = self.surface.mount(width, height, &self.tools)?;
        let mut effects = effects_from(response);
        effects.push(self.transform_effect());
        Ok(effects)
    }

    pub fn unmount(&mut self) -> Vec<HostEffect> {
        effects_from(self.surface.unmount())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    /// Update the screen position of the canvas element.
    pub fn set_screen_origin(&mut self, origin: Point) {
        self.surface.set_screen_origin(origin);
    }

    /// Route a normalized pointer event to the surface.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) -> Vec<HostEffect> {
        let response = self.surface.handle_event(event, &self.tools, now);
        let transform_changed = response.transform_changed;
        let mut effects = effects_from(response);
        if transform_changed {
            effects.push(self.transform_effect());
        }
        effects
    }

    /// A scheduled long-press timer fired.
    pub fn on_timer(&mut self, id: TimerId) -> Vec<HostEffect> {
        effects_from(self.surface.on_timer(id))
    }

    /// Look up a keyboard shortcut and apply its action.
    ///
    /// Returns `None` if the key is not bound, so the host can let the
    /// browser handle it.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> Option<Vec<HostEffect>> {
        let shortcut = ShortcutRegistry::find(key, modifiers)?;
        log::debug!("Shortcut {} -> {:?}", shortcut.format(), shortcut.action);
        Some(self.apply(shortcut.action))
    }

    /// Apply a toolbar or keyboard action.
    pub fn apply(&mut self, action: UiAction) -> Vec<HostEffect> {
        match action {
            UiAction::SetTool(tool) => {
                self.tools = self.tools.with_tool(tool);
                log::info!("Tool: {}", tool.name());
                Vec::new()
            }
            UiAction::SetStrokeColor(color) => {
                self.tools = self.tools.with_stroke_color(color);
                Vec::new()
            }
            UiAction::SetStrokeWidth(width) => {
                self.tools = self.tools.with_stroke_width(width);
                Vec::new()
            }
            UiAction::SetBackgroundColor(color) => {
                self.tools = self.tools.with_background_color(color);
                effects_from(self.surface.reset_background(&self.tools))
            }
            UiAction::ClearCanvas => {
                if self.surface.clear(&self.tools) {
                    vec![HostEffect::Redraw]
                } else {
                    Vec::new()
                }
            }
            UiAction::Undo => {
                if self.surface.undo() {
                    vec![HostEffect::Redraw]
                } else {
                    Vec::new()
                }
            }
            UiAction::ExportPng => self.export_png().into_iter().collect(),
            UiAction::ZoomIn => {
                let factor = self.surface.settings().zoom_in_factor;
                self.surface.camera_mut().zoom_by(factor);
                vec![self.transform_effect()]
            }
            UiAction::ZoomOut => {
                let factor = self.surface.settings().zoom_out_factor;
                self.surface.camera_mut().zoom_by(factor);
                vec![self.transform_effect()]
            }
            UiAction::ZoomReset => {
                self.surface.camera_mut().reset();
                vec![self.transform_effect()]
            }
        }
    }

    fn export_png(&self) -> Option<HostEffect> {
        match self.surface.export_png() {
            Ok(bytes) => Some(HostEffect::Download {
                file_name: self.surface.export_file_name().to_string(),
                mime: PNG_MIME,
                bytes,
            }),
            Err(SurfaceError::NotMounted) => {
                log::debug!("Ignoring export: surface not mounted");
                None
            }
            Err(e) => {
                log::error!("Failed to export PNG: {}", e);
                None
            }
        }
    }

    fn transform_effect(&self) -> HostEffect {
        HostEffect::ApplyTransform(self.surface.camera().css_transform())
    }
}

fn effects_from(response: SurfaceResponse) -> Vec<HostEffect> {
    let mut effects: Vec<HostEffect> = response
        .timer
        .into_iter()
        .map(|command| match command {
            TimerCommand::Schedule { id, delay } => HostEffect::ScheduleTimer { id, delay },
            TimerCommand::Cancel(id) => HostEffect::CancelTimer(id),
        })
        .collect();
    if response.redraw {
        effects.push(HostEffect::Redraw);
    }
    effects
}
