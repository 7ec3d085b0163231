//! Input model: editor mode, mouse buttons, and the gesture state machine.
//!
//! `Mode` and `ShapeType` capture what a pointer-down should do. `UiState` is
//! the editor-wide state the renderer and host read back. `InputState` tracks
//! whether the current pointer motion belongs to a drag that started with a
//! primary press on this canvas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::doc::{ShapeId, ShapeType};
use crate::error::EditorError;
use crate::geom::Point;
use crate::hit::{Cursor, Handle};

/// What a primary pointer-down does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Place a new shape of the current type and drag it out.
    Add,
    /// Select, move, and resize existing shapes.
    #[default]
    Edit,
}

impl FromStr for Mode {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "edit" => Ok(Self::Edit),
            _ => Err(EditorError::UnknownMode(s.to_owned())),
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Buttons held during a pointer-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Buttons {
    pub primary: bool,
    pub middle: bool,
    pub secondary: bool,
}

impl Buttons {
    /// Only the primary button held.
    pub const PRIMARY: Buttons = Buttons { primary: true, middle: false, secondary: false };
    /// Nothing held.
    pub const NONE: Buttons = Buttons { primary: false, middle: false, secondary: false };
}

/// Editor state visible to the renderer and the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Current editing mode.
    pub mode: Mode,
    /// Type placed by the next Add-mode press.
    pub shape_type: ShapeType,
    /// The selected shape, if any. A key into the registry, never a copy.
    pub selected_id: Option<ShapeId>,
    /// Handle captured at the last pointer-down; decides resize vs. move.
    pub active_handle: Option<Handle>,
    /// Handle under the pointer right now; drives the cursor hint only.
    pub hover_handle: Option<Handle>,
    /// Canvas position of the previous pointer event.
    pub last_pointer: Option<Point>,
    /// Last cursor hint sent to the host.
    pub cursor: Cursor,
}

/// Gesture tracking between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No primary press in progress.
    #[default]
    Idle,
    /// The primary button went down on the canvas and has not come up.
    Pressed,
}
