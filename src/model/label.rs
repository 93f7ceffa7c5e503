//! Label set: the ordered, project-wide list of annotation labels.

use crate::color_utils::label_color;

/// A label with its display color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Display name, unique within the set
    pub name: String,
    /// RGB color for the label
    pub color: [u8; 3],
}

impl Label {
    /// Create a new label with the given name and color.
    pub fn new(name: &str, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            color,
        }
    }
}

/// Ordered labels plus the single active one.
///
/// Position in the set is the label's category index in exports.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    labels: Vec<Label>,
    active: Option<String>,
    /// Counts every label ever added so colors stay stable across deletions.
    colors_assigned: u32,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label. Input is trimmed; empty names and duplicates are ignored.
    ///
    /// Returns true if the label was added.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }

        let color = label_color(self.colors_assigned);
        self.colors_assigned += 1;
        self.labels.push(Label::new(name, color));
        log::debug!("Added label '{}' ({} total)", name, self.labels.len());
        true
    }

    /// Remove a label, clearing the active label if it was this one.
    ///
    /// Returns true if the label existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.labels.len();
        self.labels.retain(|l| l.name != name);
        if self.labels.len() == before {
            return false;
        }

        if self.active.as_deref() == Some(name) {
            log::debug!("Active label '{}' deleted", name);
            self.active = None;
        }
        true
    }

    /// Select the active label. `None` clears it; unknown names are rejected.
    pub fn set_active(&mut self, name: Option<&str>) -> bool {
        match name {
            None => {
                self.active = None;
                true
            }
            Some(name) if self.contains(name) => {
                self.active = Some(name.to_string());
                true
            }
            Some(name) => {
                log::warn!("Cannot activate unknown label '{}'", name);
                false
            }
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }

    /// Zero-based position of a label.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.name == name)
    }

    pub fn color_of(&self, name: &str) -> Option<[u8; 3]> {
        self.labels.iter().find(|l| l.name == name).map(|l| l.color)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
