//! Pointer events delivered to the interaction controller.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event in scene coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

impl PointerEvent {
    /// Primary-button press at `position`.
    pub fn down(position: Point) -> Self {
        Self::Down {
            position,
            button: MouseButton::Left,
        }
    }

    /// Primary-button release at `position`.
    pub fn up(position: Point) -> Self {
        Self::Up {
            position,
            button: MouseButton::Left,
        }
    }

    pub fn moved(position: Point) -> Self {
        Self::Move { position }
    }

    pub fn position(&self) -> Point {
        match self {
            Self::Down { position, .. } | Self::Up { position, .. } | Self::Move { position } => {
                *position
            }
        }
    }
}
