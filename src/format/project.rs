//! Read-only view of the editor state that exports work from.

use crate::model::{Annotation, ImageRecord, LabelSet};
use crate::state::AnnotationStore;

/// Borrowed snapshot of everything an export needs.
///
/// Exports never see transient drawing state, so an in-progress polygon is
/// never exported.
#[derive(Debug, Clone, Copy)]
pub struct ProjectView<'a> {
    /// Loaded images in load order
    pub images: &'a [ImageRecord],
    /// Index of the current image
    pub current: Option<usize>,
    pub store: &'a AnnotationStore,
    pub labels: &'a LabelSet,
}

impl<'a> ProjectView<'a> {
    pub fn new(
        images: &'a [ImageRecord],
        current: Option<usize>,
        store: &'a AnnotationStore,
        labels: &'a LabelSet,
    ) -> Self {
        Self {
            images,
            current,
            store,
            labels,
        }
    }

    /// The current image.
    pub fn current_image(&self) -> Option<&'a ImageRecord> {
        self.current.and_then(|idx| self.images.get(idx))
    }

    /// Shapes of an image, in insertion order.
    pub fn annotations(&self, image: &ImageRecord) -> &'a [Annotation] {
        self.store.annotations(&image.name)
    }

    /// Images that hold at least one shape.
    pub fn annotated_images(&self) -> impl Iterator<Item = &'a ImageRecord> + 'a {
        let store = self.store;
        self.images
            .iter()
            .filter(move |img| store.is_annotated(&img.name))
    }
}
