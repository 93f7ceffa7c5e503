//! Trait definitions for export format implementations.

use crate::format::error::FormatError;
use crate::format::project::ProjectView;
use crate::model::EditorMode;

/// Trait for annotation export implementations.
///
/// Each format (box text lines, COCO JSON, binary mask) implements this trait
/// to turn a read-only view of the editor's annotations into named byte
/// buffers. Formats never touch the filesystem; writing is left to an
/// [`crate::format::OutputWriter`].
pub trait AnnotationFormat: Send + Sync {
    /// Unique identifier for this format (e.g., "yolo", "coco", "mask").
    fn id(&self) -> &'static str;

    /// Human-readable name for UI display.
    fn display_name(&self) -> &'static str;

    /// File extensions this format produces.
    fn extensions(&self) -> &[&'static str];

    /// Modes in which this export is offered.
    fn modes(&self) -> &[EditorMode];

    /// Check if the export is offered in `mode`.
    fn available_in(&self, mode: EditorMode) -> bool {
        self.modes().contains(&mode)
    }

    /// Export the view.
    ///
    /// Returns `Ok(None)` when there is nothing to export.
    fn export(
        &self,
        project: &ProjectView<'_>,
        options: &ExportOptions,
    ) -> Result<Option<ExportOutput>, FormatError>;
}

/// Which images an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    /// Only the current image
    #[default]
    CurrentImage,
    /// Every loaded image
    AllImages,
}

/// Options for export operations.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Which images to cover (ignored by whole-project formats).
    pub scope: ExportScope,

    /// Bundle multi-file output into a single zip archive.
    pub bundle: bool,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the export scope.
    pub fn scope(mut self, scope: ExportScope) -> Self {
        self.scope = scope;
        self
    }

    /// Bundle output into a zip archive.
    pub fn bundle(mut self, bundle: bool) -> Self {
        self.bundle = bundle;
        self
    }

    /// All images, zipped: the batch box export.
    pub fn batch() -> Self {
        Self::new().scope(ExportScope::AllImages).bundle(true)
    }
}

/// A named byte buffer produced by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// File name, no directories
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Contents as UTF-8 text, if they are text.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// Files plus a summary of what went into them.
#[derive(Debug, Default)]
pub struct ExportOutput {
    pub files: Vec<ExportFile>,
    pub result: ExportResult,
}

impl ExportOutput {
    pub fn new(files: Vec<ExportFile>, result: ExportResult) -> Self {
        Self { files, result }
    }

    /// Get a file by name.
    pub fn file(&self, name: &str) -> Option<&ExportFile> {
        self.files.iter().find(|f| f.name == name)
    }
}

/// Result of an export operation.
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Number of images exported.
    pub images_exported: usize,

    /// Number of annotations exported.
    pub annotations_exported: usize,

    /// Warnings generated during export (e.g., skipped shapes).
    pub warnings: Vec<FormatWarning>,
}

impl ExportResult {
    /// Create a new export result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: FormatWarning) {
        self.warnings.push(warning);
    }

    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Warnings above info level.
    pub fn problems(&self) -> impl Iterator<Item = &FormatWarning> {
        self.warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Warning)
    }
}

/// Warning generated during export.
#[derive(Debug, Clone)]
pub struct FormatWarning {
    /// Name of the image this warning relates to (if applicable).
    pub image: Option<String>,

    /// Human-readable warning message.
    pub message: String,

    /// Severity level of the warning.
    pub severity: WarningSeverity,
}

impl FormatWarning {
    /// Create a new warning.
    pub fn new(message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            image: None,
            message: message.into(),
            severity,
        }
    }

    /// Create an info-level warning.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Info)
    }

    /// Create a warning-level warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Warning)
    }

    /// Set the image this warning relates to.
    pub fn with_image(mut self, name: impl Into<String>) -> Self {
        self.image = Some(name.into());
        self
    }
}

/// Severity level for format warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    /// Informational message, not a problem.
    Info,
    /// Warning that something was skipped or modified.
    Warning,
}
