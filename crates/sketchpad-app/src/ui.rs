//! Toolbar actions and the DOM controls that produce them.

use sketchpad_core::{SerializableColor, ToolKind};

/// Actions that can be triggered from the toolbar or keyboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    /// Change the current tool.
    SetTool(ToolKind),
    /// Change stroke color.
    SetStrokeColor(SerializableColor),
    /// Change stroke width.
    SetStrokeWidth(f64),
    /// Change the background color. Repaints the canvas and restarts history.
    SetBackgroundColor(SerializableColor),
    /// Fill the canvas with the background color.
    ClearCanvas,
    /// Undo the last change.
    Undo,
    /// Export the canvas as a PNG download.
    ExportPng,
    /// Zoom in.
    ZoomIn,
    /// Zoom out.
    ZoomOut,
    /// Reset zoom to 100%.
    ZoomReset,
}

/// Kind of DOM control a toolbar entry is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// A button; clicking it triggers a fixed action.
    Button,
    /// A color input.
    Color,
    /// A range input.
    Range,
}

/// A toolbar control looked up by element id.
#[derive(Debug, Clone, Copy)]
pub struct ToolbarControl {
    pub element_id: &'static str,
    pub kind: ControlKind,
}

/// Element ids of the optional toolbar controls.
pub const TOOLBAR: &[ToolbarControl] = &[
    ToolbarControl { element_id: "tool-pen", kind: ControlKind::Button },
    ToolbarControl { element_id: "tool-eraser", kind: ControlKind::Button },
    ToolbarControl { element_id: "stroke-color", kind: ControlKind::Color },
    ToolbarControl { element_id: "stroke-width", kind: ControlKind::Range },
    ToolbarControl { element_id: "background-color", kind: ControlKind::Color },
    ToolbarControl { element_id: "clear-canvas", kind: ControlKind::Button },
    ToolbarControl { element_id: "undo", kind: ControlKind::Button },
    ToolbarControl { element_id: "save-png", kind: ControlKind::Button },
];

/// Translate a toolbar control event into an action.
///
/// `value` is the input's current value for color and range controls and is
/// ignored for buttons. Unparseable values produce `None`.
pub fn toolbar_action(element_id: &str, value: &str) -> Option<UiAction> {
    match element_id {
        "tool-pen" => Some(UiAction::SetTool(ToolKind::Pen)),
        "tool-eraser" => Some(UiAction::SetTool(ToolKind::Eraser)),
        "clear-canvas" => Some(UiAction::ClearCanvas),
        "undo" => Some(UiAction::Undo),
        "save-png" => Some(UiAction::ExportPng),
        "stroke-color" => parse_color(value).map(UiAction::SetStrokeColor),
        "background-color" => parse_color(value).map(UiAction::SetBackgroundColor),
        "stroke-width" => match value.trim().parse::<f64>() {
            Ok(width) => Some(UiAction::SetStrokeWidth(width)),
            Err(e) => {
                log::warn!("Ignoring stroke width {:?}: {}", value, e);
                None
            }
        },
        _ => None,
    }
}

fn parse_color(value: &str) -> Option<SerializableColor> {
    match SerializableColor::from_hex(value) {
        Ok(color) => Some(color),
        Err(e) => {
            log::warn!("Ignoring color input: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_actions() {
        assert_eq!(toolbar_action("tool-eraser", ""), Some(UiAction::SetTool(ToolKind::Eraser)));
        assert_eq!(toolbar_action("undo", "ignored"), Some(UiAction::Undo));
        assert_eq!(toolbar_action("save-png", ""), Some(UiAction::ExportPng));
    }

    #[test]
    fn test_input_actions() {
        assert_eq!(
            toolbar_action("stroke-color", "#00ff00"),
            Some(UiAction::SetStrokeColor(SerializableColor::rgb(0, 255, 0)))
        );
        assert_eq!(toolbar_action("stroke-width", "12"), Some(UiAction::SetStrokeWidth(12.0)));
        assert_eq!(toolbar_action("stroke-width", "wide"), None);
        assert_eq!(toolbar_action("background-color", "blue"), None);
    }

    #[test]
    fn test_every_control_is_mapped() {
        for control in TOOLBAR {
            let value = match control.kind {
                ControlKind::Button => "",
                ControlKind::Color => "#123456",
                ControlKind::Range => "5",
            };
            assert!(toolbar_action(control.element_id, value).is_some(), "{}", control.element_id);
        }
    }
}
