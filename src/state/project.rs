//! Loaded image list and navigation.

use crate::model::ImageRecord;

/// Supported image extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "tif", "webp"];

/// Check if a filename (string) has a supported image extension.
/// Works with both full paths and just filenames.
pub fn is_image_filename(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Images loaded into the editor, in load order.
#[derive(Clone, Debug, Default)]
pub struct ProjectState {
    /// Loaded images
    pub images: Vec<ImageRecord>,
    /// Current image index, `None` while nothing is loaded
    pub current_index: Option<usize>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image. Names are unique keys; a duplicate is rejected.
    ///
    /// The first image added becomes current.
    pub fn push(&mut self, record: ImageRecord) -> bool {
        if self.contains(&record.name) {
            log::warn!("Image '{}' is already loaded, ignoring", record.name);
            return false;
        }

        self.images.push(record);
        if self.current_index.is_none() {
            self.current_index = Some(0);
        }
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.iter().any(|img| img.name == name)
    }

    /// Get the current image.
    pub fn current_image(&self) -> Option<&ImageRecord> {
        self.current_index.and_then(|idx| self.images.get(idx))
    }

    /// Name of the current image.
    pub fn current_name(&self) -> Option<&str> {
        self.current_image().map(|img| img.name.as_str())
    }

    pub fn find(&self, name: &str) -> Option<&ImageRecord> {
        self.images.iter().find(|img| img.name == name)
    }

    /// Navigate to the next image. Stops at the last image.
    pub fn next_image(&mut self) -> bool {
        match self.current_index {
            Some(idx) if idx + 1 < self.images.len() => {
                self.current_index = Some(idx + 1);
                true
            }
            _ => false,
        }
    }

    /// Navigate to the previous image. Stops at the first image.
    pub fn prev_image(&mut self) -> bool {
        match self.current_index {
            Some(idx) if idx > 0 => {
                self.current_index = Some(idx - 1);
                true
            }
            _ => false,
        }
    }

    /// Jump to an image by index.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.images.len() && self.current_index != Some(index) {
            self.current_index = Some(index);
            true
        } else {
            false
        }
    }

    /// Remove the current image and clamp the index to the remaining list.
    pub fn remove_current(&mut self) -> Option<ImageRecord> {
        let idx = self.current_index?;
        if idx >= self.images.len() {
            return None;
        }

        let removed = self.images.remove(idx);
        self.current_index = if self.images.is_empty() {
            None
        } else {
            Some(idx.min(self.images.len() - 1))
        };
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Get progress string (e.g., "Image 3 of 10").
    pub fn progress(&self) -> String {
        match self.current_index {
            Some(idx) if !self.images.is_empty() => {
                format!("Image {} of {}", idx + 1, self.images.len())
            }
            _ => String::new(),
        }
    }
}
