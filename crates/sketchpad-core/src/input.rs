//! Unified mouse/touch/wheel input.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Phase of a mouse event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MousePhase {
    Down,
    Move,
    Up,
    Leave,
}

/// Phase of a touch event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are in screen coordinates; the surface maps them into canvas
/// space itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
    Leave,
    Wheel { delta_y: f64 },
}

impl PointerEvent {
    /// Normalize a mouse event.
    pub fn from_mouse(phase: MousePhase, position: Point) -> Self {
        match phase {
            MousePhase::Down => PointerEvent::Down { position },
            MousePhase::Move => PointerEvent::Move { position },
            MousePhase::Up => PointerEvent::Up,
            MousePhase::Leave => PointerEvent::Leave,
        }
    }

    /// Normalize a touch event using its primary contact.
    ///
    /// Start and move events without any active touch yield `None`. End and
    /// cancel never carry a position.
    pub fn from_touches(phase: TouchPhase, touches: &[Point]) -> Option<Self> {
        match phase {
            TouchPhase::Start => primary_contact(touches).map(|position| PointerEvent::Down { position }),
            TouchPhase::Move => primary_contact(touches).map(|position| PointerEvent::Move { position }),
            TouchPhase::End | TouchPhase::Cancel => Some(PointerEvent::Up),
        }
    }

    pub fn wheel(delta_y: f64) -> Self {
        PointerEvent::Wheel { delta_y }
    }

    /// Screen position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position } | PointerEvent::Move { position } => Some(*position),
            PointerEvent::Up | PointerEvent::Leave | PointerEvent::Wheel { .. } => None,
        }
    }
}

/// The first active touch.
pub fn primary_contact(touches: &[Point]) -> Option<Point> {
    touches.first().copied()
}
