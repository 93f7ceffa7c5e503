//! Trait-based image decoding.

/// Error type for decoder operations.
#[derive(Debug, Clone)]
pub struct LoaderError {
    /// Human-readable error message.
    pub message: String,
    /// The decoder that produced this error (if known).
    pub loader_id: Option<&'static str>,
}

impl LoaderError {
    /// Create a new loader error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            loader_id: None,
        }
    }

    /// Create an error with decoder context.
    pub fn with_loader(mut self, loader_id: &'static str) -> Self {
        self.loader_id = Some(loader_id);
        self
    }
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(loader) = self.loader_id {
            write!(f, "[{}] {}", loader, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<String> for LoaderError {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for LoaderError {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A decoded image: its true size and RGBA raster.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: image::RgbaImage,
}

impl DecodedImage {
    pub fn new(pixels: image::RgbaImage) -> Self {
        Self {
            width: pixels.width(),
            height: pixels.height(),
            pixels,
        }
    }
}

/// Trait for image decoders.
pub trait ImageDecoder {
    /// Unique identifier for this decoder.
    fn id(&self) -> &'static str;

    /// File extensions this decoder handles (lowercase, without dots).
    fn extensions(&self) -> &'static [&'static str];

    /// Check magic bytes to see if this decoder can likely handle the data.
    fn can_decode(&self, data: &[u8]) -> bool;

    /// Decode raw file bytes. `name` is only used for error context.
    fn decode(&self, name: &str, data: &[u8]) -> Result<DecodedImage, LoaderError>;

    /// Check if a filename has one of this decoder's extensions.
    fn handles_filename(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.extensions()
            .iter()
            .any(|ext| lower.ends_with(&format!(".{}", ext)))
    }
}
