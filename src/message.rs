//! Editor event types.
//!
//! All pointer, keyboard and command input is represented as events in the
//! Elm architecture style and dispatched through [`crate::Editor::update`].
//! Pointer coordinates are surface pixels.

use serde::{Deserialize, Serialize};

use crate::model::EditorMode;

/// Events that can be sent to update editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    // Pointer
    /// Primary button pressed on the surface
    PointerDown { x: f64, y: f64 },
    /// Pointer moved over the surface
    PointerMove { x: f64, y: f64 },
    /// Primary button released
    PointerUp { x: f64, y: f64 },
    /// Press and release without a drag
    Click { x: f64, y: f64 },
    /// Double click anywhere on the surface
    DoubleClick,
    /// Pointer left the surface
    PointerLeave,

    // Keyboard
    /// Key pressed, resolved through the key bindings
    Key {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },

    // Commands
    /// Switch between box and polygon mode
    SetMode { mode: EditorMode },
    /// Navigate to next image
    NextImage,
    /// Navigate to previous image
    PrevImage,
    /// Jump to an image by index
    SelectImage { index: usize },
    /// Register a decoded image
    LoadImage { name: String, width: u32, height: u32 },
    /// Delete the current image and its annotations
    DeleteImage,
    /// Add a label to the label set
    AddLabel { name: String },
    /// Select the active label, or clear it with `None`
    SetActiveLabel { name: Option<String> },
    /// Delete a label and every shape carrying it
    DeleteLabel { name: String },
    /// Viewport resized
    SetViewport { width: f64, height: f64 },
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Char(char),
    Enter,
    Delete,
    Backspace,
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        meta: false,
        shift: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// User-facing warning returned instead of performing a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// Shape creation attempted without an active label
    NoActiveLabel,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::NoActiveLabel => "Please create and select a label before annotating.",
        }
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Nothing changed
    Ignored,
    /// State changed; the frame should be rebuilt
    Redraw,
    /// Nothing changed; show this warning
    Advisory(Advisory),
}

impl Response {
    /// Map a "did anything change" flag to a response.
    pub fn redraw_if(changed: bool) -> Self {
        if changed {
            Response::Redraw
        } else {
            Response::Ignored
        }
    }

    pub fn is_redraw(&self) -> bool {
        matches!(self, Response::Redraw)
    }
}
