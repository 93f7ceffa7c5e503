//! Per-image annotation storage.

use std::collections::HashMap;

use crate::model::{Annotation, EditorMode};

/// Shapes drawn on one image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationSet {
    /// Mode that was active when the set was created (informational)
    pub mode: EditorMode,
    /// Shapes in insertion order, which is also z-order
    pub annotations: Vec<Annotation>,
}

impl AnnotationSet {
    pub fn new(mode: EditorMode) -> Self {
        Self {
            mode,
            annotations: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Indices of shapes in hit-test order (topmost first).
    pub fn topmost_first(&self) -> impl Iterator<Item = (usize, &Annotation)> {
        self.annotations.iter().enumerate().rev()
    }
}

/// Annotation sets keyed by image name, plus the global editing mode.
#[derive(Clone, Debug, Default)]
pub struct AnnotationStore {
    sets: HashMap<String, AnnotationSet>,
    mode: EditorMode,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Ensure a set exists for an image, tagging it with the current mode.
    pub fn ensure(&mut self, name: &str) -> &mut AnnotationSet {
        let mode = self.mode;
        self.sets
            .entry(name.to_string())
            .or_insert_with(|| AnnotationSet::new(mode))
    }

    /// Get the set for an image, if one exists.
    pub fn get(&self, name: &str) -> Option<&AnnotationSet> {
        self.sets.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AnnotationSet> {
        self.sets.get_mut(name)
    }

    /// Shapes of an image; empty when the image has no set.
    pub fn annotations(&self, name: &str) -> &[Annotation] {
        self.sets
            .get(name)
            .map(|set| set.annotations.as_slice())
            .unwrap_or(&[])
    }

    /// Append a shape, creating the set on first use. Returns its index.
    pub fn add(&mut self, name: &str, annotation: Annotation) -> usize {
        let set = self.ensure(name);
        set.annotations.push(annotation);
        set.annotations.len() - 1
    }

    /// Remove the shape at `index`. Missing images or indices are a no-op.
    pub fn remove(&mut self, name: &str, index: usize) -> Option<Annotation> {
        let set = self.sets.get_mut(name)?;
        if index < set.annotations.len() {
            Some(set.annotations.remove(index))
        } else {
            None
        }
    }

    /// Remove the most recently added shape of an image.
    pub fn pop(&mut self, name: &str) -> Option<Annotation> {
        self.sets.get_mut(name)?.annotations.pop()
    }

    /// Remove every shape carrying `label` from every set.
    ///
    /// Returns the number of shapes removed per image, only for images that
    /// lost at least one shape.
    pub fn remove_label(&mut self, label: &str) -> HashMap<String, usize> {
        let mut removed = HashMap::new();
        for (name, set) in self.sets.iter_mut() {
            let before = set.annotations.len();
            set.annotations.retain(|a| a.label != label);
            let count = before - set.annotations.len();
            if count > 0 {
                removed.insert(name.clone(), count);
            }
        }
        removed
    }

    /// Switch the global mode.
    ///
    /// Shapes of the other type are purged from `current` only. Returns the
    /// number of shapes purged; switching to the mode already active is a
    /// no-op.
    pub fn set_mode(&mut self, new_mode: EditorMode, current: Option<&str>) -> usize {
        if new_mode == self.mode {
            return 0;
        }

        let mut purged = 0;
        if let Some(set) = current.and_then(|name| self.sets.get_mut(name)) {
            let before = set.annotations.len();
            set.annotations.retain(|a| a.shape.mode() == new_mode);
            purged = before - set.annotations.len();
        }

        log::debug!(
            "Mode {} -> {}, purged {} shapes from {:?}",
            self.mode.name(),
            new_mode.name(),
            purged,
            current
        );
        self.mode = new_mode;
        purged
    }

    /// Drop an image's set entirely.
    pub fn remove_image(&mut self, name: &str) -> Option<AnnotationSet> {
        self.sets.remove(name)
    }

    /// True if the image has at least one shape.
    pub fn is_annotated(&self, name: &str) -> bool {
        self.sets.get(name).is_some_and(|set| !set.is_empty())
    }

    /// Total shapes across all images.
    pub fn total(&self) -> usize {
        self.sets.values().map(AnnotationSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::NormBox;

    fn boxed(label: &str) -> Annotation {
        Annotation::bounding_box(NormBox::new(0.5, 0.5, 0.1, 0.1), label)
    }

    fn poly(label: &str) -> Annotation {
        Annotation::polygon(vec![(0.1, 0.1), (0.2, 0.1), (0.2, 0.2)], label)
    }

    #[test]
    fn test_add_creates_set_lazily() {
        let mut store = AnnotationStore::new();
        assert!(store.get("a.png").is_none());
        assert_eq!(store.add("a.png", boxed("cat")), 0);
        assert_eq!(store.add("a.png", boxed("cat")), 1);
        assert_eq!(store.get("a.png").map(AnnotationSet::len), Some(2));
        assert!(store.is_annotated("a.png"));
        assert!(!store.is_annotated("b.png"));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut store = AnnotationStore::new();
        store.add("a.png", boxed("cat"));
        assert!(store.remove("a.png", 5).is_none());
        assert!(store.remove("missing.png", 0).is_none());
        assert_eq!(store.annotations("a.png").len(), 1);
    }

    #[test]
    fn test_set_mode_purges_current_image_only() {
        let mut store = AnnotationStore::new();
        store.add("a.png", boxed("cat"));
        store.add("a.png", boxed("cat"));
        store.add("b.png", boxed("cat"));

        let purged = store.set_mode(EditorMode::Polygon, Some("a.png"));
        assert_eq!(purged, 2);
        assert_eq!(store.mode(), EditorMode::Polygon);
        assert!(store.annotations("a.png").is_empty());
        assert_eq!(store.annotations("b.png").len(), 1);
    }

    #[test]
    fn test_set_mode_same_mode_keeps_shapes() {
        let mut store = AnnotationStore::new();
        store.add("a.png", boxed("cat"));
        store.add("a.png", poly("cat"));
        assert_eq!(store.set_mode(EditorMode::Box, Some("a.png")), 0);
        assert_eq!(store.annotations("a.png").len(), 2);
    }

    #[test]
    fn test_set_mode_keeps_matching_type() {
        let mut store = AnnotationStore::new();
        store.add("a.png", boxed("cat"));
        store.add("a.png", poly("dog"));
        store.set_mode(EditorMode::Polygon, Some("a.png"));
        let remaining = store.annotations("a.png");
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].is_polygon());
    }

    #[test]
    fn test_remove_label_cascades() {
        let mut store = AnnotationStore::new();
        store.add("a.png", boxed("cat"));
        store.add("a.png", boxed("dog"));
        store.add("a.png", boxed("cat"));
        store.add("b.png", boxed("cat"));

        let removed = store.remove_label("cat");
        assert_eq!(removed.get("a.png"), Some(&2));
        assert_eq!(removed.get("b.png"), Some(&1));
        assert_eq!(store.total(), 1);
        assert_eq!(store.annotations("a.png")[0].label, "dog");
    }

    #[test]
    fn test_pop_and_remove_image() {
        let mut store = AnnotationStore::new();
        store.add("a.png", boxed("cat"));
        store.add("a.png", poly("dog"));
        assert_eq!(store.pop("a.png").map(|a| a.label), Some("dog".to_string()));
        assert!(store.remove_image("a.png").is_some());
        assert!(store.pop("a.png").is_none());
    }

    #[test]
    fn test_set_records_creation_mode() {
        let mut store = AnnotationStore::new();
        store.set_mode(EditorMode::Polygon, None);
        store.ensure("a.png");
        assert_eq!(store.get("a.png").map(|s| s.mode), Some(EditorMode::Polygon));
    }
}
