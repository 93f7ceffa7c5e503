//! Customizable keybindings for the editor.
//!
//! Keys are matched case-insensitively for letters. Undo additionally needs
//! the command modifier (Ctrl, or Cmd on macOS); every other action fires on
//! the bare key.

use serde::{Deserialize, Serialize};

use crate::message::{Key, Modifiers};

/// Actions a key press can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    /// Pop the last draft vertex or the last shape
    Undo,
    /// Finalize the in-progress polygon
    Commit,
    /// Delete the selected vertex, polygon or box
    Delete,
    /// Switch to box mode
    BoxMode,
    /// Switch to polygon mode
    PolygonMode,
    PrevImage,
    NextImage,
}

impl EditorAction {
    /// Get the display name for this action.
    pub fn name(&self) -> &'static str {
        match self {
            EditorAction::Undo => "Undo",
            EditorAction::Commit => "Finish polygon",
            EditorAction::Delete => "Delete selection",
            EditorAction::BoxMode => "Box mode",
            EditorAction::PolygonMode => "Polygon mode",
            EditorAction::PrevImage => "Previous image",
            EditorAction::NextImage => "Next image",
        }
    }

    /// Get all actions in settings order.
    pub fn all() -> &'static [EditorAction] {
        &[
            EditorAction::Undo,
            EditorAction::Commit,
            EditorAction::Delete,
            EditorAction::BoxMode,
            EditorAction::PolygonMode,
            EditorAction::PrevImage,
            EditorAction::NextImage,
        ]
    }
}

/// Keybinding configuration for the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Undo key, pressed together with Ctrl/Cmd
    pub undo: Key,
    pub commit: Key,
    pub delete: Key,
    pub box_mode: Key,
    pub polygon_mode: Key,
    pub prev_image: Key,
    pub next_image: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            undo: Key::Char('z'),
            commit: Key::Enter,
            delete: Key::Delete,
            box_mode: Key::Char('b'),
            polygon_mode: Key::Char('p'),
            prev_image: Key::ArrowLeft,
            next_image: Key::ArrowRight,
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for_key(&self, key: Key, modifiers: Modifiers) -> Option<EditorAction> {
        if modifiers.command() {
            return keys_match(key, self.undo).then_some(EditorAction::Undo);
        }

        EditorAction::all()
            .iter()
            .copied()
            .filter(|action| *action != EditorAction::Undo)
            .find(|action| keys_match(key, self.key_for_action(*action)))
    }

    /// Get the key bound to an action.
    pub fn key_for_action(&self, action: EditorAction) -> Key {
        match action {
            EditorAction::Undo => self.undo,
            EditorAction::Commit => self.commit,
            EditorAction::Delete => self.delete,
            EditorAction::BoxMode => self.box_mode,
            EditorAction::PolygonMode => self.polygon_mode,
            EditorAction::PrevImage => self.prev_image,
            EditorAction::NextImage => self.next_image,
        }
    }

    /// Check if a key is already used by a bare-key action other than
    /// `exclude`. Undo lives behind the command modifier and never conflicts.
    pub fn key_conflict(&self, key: Key, exclude: Option<EditorAction>) -> Option<EditorAction> {
        EditorAction::all().iter().copied().find(|action| {
            *action != EditorAction::Undo
                && Some(*action) != exclude
                && keys_match(key, self.key_for_action(*action))
        })
    }

    /// First pair of bare-key actions bound to the same key, in settings order.
    pub fn first_conflict(&self) -> Option<(EditorAction, EditorAction)> {
        EditorAction::all()
            .iter()
            .copied()
            .filter(|action| *action != EditorAction::Undo)
            .find_map(|action| {
                self.key_conflict(self.key_for_action(action), Some(action))
                    .map(|other| (action, other))
            })
    }
}

fn keys_match(pressed: Key, bound: Key) -> bool {
    match (pressed, bound) {
        (Key::Char(a), Key::Char(b)) => a.eq_ignore_ascii_case(&b),
        _ => pressed == bound,
    }
}
