//! Output writers for exported files.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::format::error::FormatError;
use crate::format::traits::ExportFile;

/// Destination for named export buffers.
pub trait OutputWriter {
    /// Persist one named buffer.
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), FormatError>;

    /// Persist every file of an export.
    fn write_all(&mut self, files: &[ExportFile]) -> Result<(), FormatError> {
        for file in files {
            self.write(&file.name, &file.bytes)?;
        }
        Ok(())
    }
}

/// Writes files into a directory, creating it on first write.
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectoryWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl OutputWriter for DirectoryWriter {
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), FormatError> {
        if !is_plain_file_name(name) {
            return Err(FormatError::invalid_name(name));
        }

        std::fs::create_dir_all(&self.root)?;
        let path = self.root.join(name);
        std::fs::write(&path, bytes)?;
        log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        self.written.push(path);
        Ok(())
    }
}

/// Keeps written files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    pub files: Vec<ExportFile>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ExportFile> {
        self.files.iter().find(|f| f.name == name)
    }
}

impl OutputWriter for MemoryWriter {
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), FormatError> {
        self.files.push(ExportFile::new(name, bytes));
        Ok(())
    }
}

/// Bundle files into a deflate-compressed zip archive named `archive_name`.
pub fn bundle_zip(archive_name: &str, files: &[ExportFile]) -> Result<ExportFile, FormatError> {
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for file in files {
        archive.start_file(file.name.as_str(), options)?;
        archive.write_all(&file.bytes)?;
    }

    let bytes = archive.finish()?.into_inner();
    log::debug!(
        "Bundled {} files into {} ({} bytes)",
        files.len(),
        archive_name,
        bytes.len()
    );
    Ok(ExportFile::new(archive_name, bytes))
}

/// A name with no path separators or parent references.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}
