//! Unit tests for export format implementations.
//!
//! Fixtures build a real editor state (images, labels, store) and export it
//! through a borrowed project view.

mod coco_tests;
mod mask_tests;
mod yolo_tests;

use crate::geometry::NormBox;
use crate::model::{Annotation, ImageRecord, LabelSet};
use crate::state::AnnotationStore;

/// Owned editor state that tests borrow a `ProjectView` from.
pub(super) struct Fixture {
    pub images: Vec<ImageRecord>,
    pub current: Option<usize>,
    pub store: AnnotationStore,
    pub labels: LabelSet,
}

impl Fixture {
    pub fn new(images: &[(&str, u32, u32)], labels: &[&str]) -> Self {
        let mut label_set = LabelSet::new();
        for label in labels {
            label_set.add(label);
        }
        Self {
            images: images
                .iter()
                .map(|(name, w, h)| ImageRecord::new(*name, *w, *h))
                .collect(),
            current: if images.is_empty() { None } else { Some(0) },
            store: AnnotationStore::new(),
            labels: label_set,
        }
    }

    pub fn view(&self) -> crate::format::ProjectView<'_> {
        crate::format::ProjectView::new(&self.images, self.current, &self.store, &self.labels)
    }

    pub fn add_box(&mut self, image: &str, label: &str, b: (f64, f64, f64, f64)) {
        self.store.add(
            image,
            Annotation::bounding_box(NormBox::new(b.0, b.1, b.2, b.3), label),
        );
    }

    pub fn add_polygon(&mut self, image: &str, label: &str, vertices: &[(f64, f64)]) {
        self.store
            .add(image, Annotation::polygon(vertices.to_vec(), label));
    }
}
