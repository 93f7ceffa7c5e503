//! Error types for export operations.

use thiserror::Error;

/// Errors that can occur while encoding or writing exports.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raster encoding error
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Archive creation error
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Format ID not present in the registry
    #[error("Unknown export format: {id}")]
    UnknownFormat {
        /// The requested format ID
        id: String,
    },

    /// Format exists but is not offered in the current mode
    #[error("Format '{format}' is not available in {mode} mode")]
    UnavailableInMode {
        /// The format ID
        format: String,
        /// The active mode name
        mode: String,
    },

    /// Export file name that cannot be written safely
    #[error("Invalid output name: {name}")]
    InvalidName {
        /// The rejected name
        name: String,
    },
}

impl FormatError {
    /// Create an unknown format error.
    pub fn unknown_format(id: impl Into<String>) -> Self {
        Self::UnknownFormat { id: id.into() }
    }

    /// Create an unavailable-in-mode error.
    pub fn unavailable_in_mode(format: impl Into<String>, mode: impl Into<String>) -> Self {
        Self::UnavailableInMode {
            format: format.into(),
            mode: mode.into(),
        }
    }

    /// Create an invalid output name error.
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }
}
