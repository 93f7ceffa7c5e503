//! Loaded image records.

use crate::data::DecodedImage;

/// Metadata for one loaded image. Immutable once created.
///
/// The decoded raster stays with the decoder's owner; the editor only needs
/// the true pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Unique key, usually the file name
    pub name: String,
    /// True image width in pixels
    pub width: u32,
    /// True image height in pixels
    pub height: u32,
}

impl ImageRecord {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    pub fn from_decoded(name: impl Into<String>, image: &DecodedImage) -> Self {
        Self::new(name, image.width, image.height)
    }

    /// File name without its last extension, used to name exports.
    pub fn base_name(&self) -> &str {
        base_name(&self.name)
    }
}

/// Strip the last `.ext` from a file name. Names without a dot (or with only
/// a leading dot) are returned unchanged.
pub fn base_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => &name[..idx],
        _ => name,
    }
}
