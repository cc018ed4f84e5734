//! Keyboard shortcut registry and documentation.

use crate::ui::UiAction;
use sketchpad_core::{Modifiers, ToolKind};

/// A keyboard shortcut definition.
#[derive(Debug, Clone, Copy)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub action: UiAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, action: UiAction, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }

    /// Whether a key event triggers this shortcut. Ctrl and Cmd are
    /// interchangeable; letter case is ignored.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.ctrl == modifiers.command() && self.key.eq_ignore_ascii_case(key)
    }
}

const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("P", false, UiAction::SetTool(ToolKind::Pen), "Pen tool"),
    Shortcut::new("E", false, UiAction::SetTool(ToolKind::Eraser), "Eraser tool"),
    Shortcut::new("Z", true, UiAction::Undo, "Undo"),
    Shortcut::new("E", true, UiAction::ExportPng, "Export to PNG"),
    Shortcut::new("Delete", true, UiAction::ClearCanvas, "Clear canvas"),
    Shortcut::new("=", true, UiAction::ZoomIn, "Zoom in"),
    Shortcut::new("+", true, UiAction::ZoomIn, "Zoom in"),
    Shortcut::new("-", true, UiAction::ZoomOut, "Zoom out"),
    Shortcut::new("0", true, UiAction::ZoomReset, "Reset zoom"),
];

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> &'static [Shortcut] {
        SHORTCUTS
    }

    /// Find the shortcut bound to a key event.
    pub fn find(key: &str, modifiers: Modifiers) -> Option<&'static Shortcut> {
        SHORTCUTS.iter().find(|s| s.matches(key, modifiers))
    }

    /// Log all shortcuts.
    pub fn log_all() {
        for shortcut in SHORTCUTS {
            log::info!("  {:10} {}", shortcut.format(), shortcut.description);
        }
    }
}
