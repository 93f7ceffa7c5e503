//! Annotation export system.
//!
//! Exports are trait-based: each format implements [`AnnotationFormat`] and
//! turns a borrowed [`ProjectView`] into named byte buffers. Writing those
//! buffers is a separate step behind [`OutputWriter`].
//!
//! ## Supported Formats
//!
//! - **YOLO TXT**: one `<label> <xc> <yc> <w> <h>` line per box, per image or
//!   zipped for all images
//! - **COCO JSON**: polygons with segmentation in true image pixels
//! - **Binary mask PNG**: the current image's polygons filled white on black
//!
//! ## Usage
//!
//! ```rust,ignore
//! use boxpoly::format::{DirectoryWriter, ExportOptions, FormatRegistry, OutputWriter};
//!
//! let registry = FormatRegistry::new();
//! let format = registry.get("yolo").unwrap();
//! if let Some(output) = format.export(&editor.project_view(), &ExportOptions::batch())? {
//!     DirectoryWriter::new("exports").write_all(&output.files)?;
//! }
//! ```

mod error;
pub mod formats;
mod project;
mod registry;
mod traits;
mod writer;

pub use error::FormatError;
pub use project::ProjectView;
pub use registry::FormatRegistry;
pub use traits::{
    AnnotationFormat, ExportFile, ExportOptions, ExportOutput, ExportResult, ExportScope,
    FormatWarning, WarningSeverity,
};
pub use writer::{DirectoryWriter, MemoryWriter, OutputWriter, bundle_zip};
