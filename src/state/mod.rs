//! Application state management modules.

mod editor;
mod project;
mod store;

pub use editor::{BoxPhase, CursorHint, EditorState};
pub use project::{IMAGE_EXTENSIONS, ProjectState, is_image_filename};
pub use store::{AnnotationSet, AnnotationStore};
