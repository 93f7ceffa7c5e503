//! Format registry for discovering and accessing export formats.

use std::collections::HashMap;

use crate::format::formats::{CocoFormat, MaskFormat, YoloFormat};
use crate::format::traits::AnnotationFormat;
use crate::model::EditorMode;

/// Registry of available export formats.
///
/// All built-in formats are registered automatically on creation.
pub struct FormatRegistry {
    formats: HashMap<&'static str, Box<dyn AnnotationFormat>>,
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats registered.
    pub fn new() -> Self {
        let mut registry = Self {
            formats: HashMap::new(),
        };

        registry.register(Box::new(YoloFormat));
        registry.register(Box::new(CocoFormat));
        registry.register(Box::new(MaskFormat));

        registry
    }

    /// Register a format implementation.
    pub fn register(&mut self, format: Box<dyn AnnotationFormat>) {
        self.formats.insert(format.id(), format);
    }

    /// Get a format by its ID.
    pub fn get(&self, id: &str) -> Option<&dyn AnnotationFormat> {
        self.formats.get(id).map(|f| f.as_ref())
    }

    /// Get all registered formats, sorted by ID.
    pub fn all(&self) -> Vec<&dyn AnnotationFormat> {
        let mut formats: Vec<&dyn AnnotationFormat> =
            self.formats.values().map(|f| f.as_ref()).collect();
        formats.sort_by_key(|f| f.id());
        formats
    }

    /// Get all format IDs, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.formats.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Formats offered while `mode` is active.
    pub fn available_exports(&self, mode: EditorMode) -> Vec<&dyn AnnotationFormat> {
        self.all()
            .into_iter()
            .filter(|f| f.available_in(mode))
            .collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
