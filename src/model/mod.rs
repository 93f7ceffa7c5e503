//! Data models for the annotation editor.

mod annotation;
mod image;
mod label;

pub use annotation::{Annotation, AnnotationShape, EditorMode};
pub use image::{ImageRecord, base_name};
pub use label::{Label, LabelSet};
