//! Transient drawing state owned by the editor.
//!
//! Nothing here is persisted. It is cleared on every mode switch and image
//! switch so stale indices never outlive the shapes they point at.

use crate::geometry::Handle;

/// Phase of the box-mode pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoxPhase {
    /// No pointer gesture in progress
    #[default]
    Idle,
    /// Dragging out a new box from `origin`
    Drawing {
        origin: (f64, f64),
        current: (f64, f64),
    },
    /// Dragging a handle of the selected box
    Resizing { handle: Handle },
}

/// Cursor shape the renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// Over a grabbable handle or vertex
    Pointer,
    /// Over the body of the selected box
    Move,
}

/// Transient state for the current image editing session.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub box_phase: BoxPhase,
    /// Index of the selected box in the current image's set
    pub selected_box: Option<usize>,
    /// Index of the selected polygon in the current image's set
    pub selected_polygon: Option<usize>,
    /// In-progress polygon vertices, normalized
    pub draft: Vec<(f64, f64)>,
    /// Draft vertex being dragged
    pub selected_vertex: Option<usize>,
    /// Last pointer position on the surface; `None` once the pointer leaves
    pub pointer: Option<(f64, f64)>,
    pub cursor: CursorHint,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything except the pointer position.
    pub fn clear(&mut self) {
        let pointer = self.pointer;
        *self = Self {
            pointer,
            ..Self::default()
        };
    }

    pub fn clear_selection(&mut self) {
        self.selected_box = None;
        self.selected_polygon = None;
    }

    /// Active resize handle, if a handle drag is in progress.
    pub fn active_handle(&self) -> Option<Handle> {
        match self.box_phase {
            BoxPhase::Resizing { handle } => Some(handle),
            _ => None,
        }
    }

    /// Current drag preview corners, if a new box is being drawn.
    pub fn drag_preview(&self) -> Option<((f64, f64), (f64, f64))> {
        match self.box_phase {
            BoxPhase::Drawing { origin, current } => Some((origin, current)),
            _ => None,
        }
    }

    pub fn is_drafting(&self) -> bool {
        !self.draft.is_empty()
    }

    /// Adjust selections after the shape at `index` left the current set.
    pub fn shape_removed(&mut self, index: usize) {
        self.selected_box = shift_after_removal(self.selected_box, index);
        self.selected_polygon = shift_after_removal(self.selected_polygon, index);
    }
}

fn shift_after_removal(selection: Option<usize>, removed: usize) -> Option<usize> {
    match selection {
        Some(sel) if sel == removed => None,
        Some(sel) if sel > removed => Some(sel - 1),
        other => other,
    }
}
