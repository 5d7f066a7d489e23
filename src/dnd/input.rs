use serde::{Deserialize, Serialize};

/// Keys the drag controller reacts to, named after DOM `KeyboardEvent.key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowDown | Self::ArrowLeft | Self::ArrowRight
        )
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        match key {
            " " | "Space" | "Spacebar" => Self::Space,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

/// Which half of a hovered card the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropDirection {
    Top,
    Bottom,
}

impl DropDirection {
    /// Top when the pointer is at or above the element's vertical midpoint
    pub fn from_pointer(pointer_y: f64, rect: PointerRect) -> Self {
        if pointer_y <= rect.midpoint() {
            Self::Top
        } else {
            Self::Bottom
        }
    }
}

/// Vertical bounds of a hovered element, in the same space as the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRect {
    pub top: f64,
    pub bottom: f64,
}

impl PointerRect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn midpoint(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}
