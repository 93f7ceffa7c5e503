//! Scripted editing sessions.
//!
//! A session script is a JSON document listing images to load, labels to
//! create, a stream of [`EditorEvent`]s and the exports to run at the end:
//!
//! ```json
//! {
//!   "images": ["frames/001.png", "frames/002.png"],
//!   "labels": ["cat", "dog"],
//!   "active_label": "cat",
//!   "events": [
//!     { "type": "pointer_down", "x": 10.0, "y": 10.0 },
//!     { "type": "pointer_move", "x": 90.0, "y": 60.0 },
//!     { "type": "pointer_up", "x": 90.0, "y": 60.0 }
//!   ],
//!   "exports": [{ "format": "yolo", "all_images": true, "bundle": true }]
//! }
//! ```
//!
//! Relative image paths resolve against the script's directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::Editor;
use crate::data::{ImageDecoder, LoaderError};
use crate::format::{
    ExportOptions, ExportScope, FormatError, FormatRegistry, OutputWriter, WarningSeverity,
};
use crate::message::{EditorEvent, Response};
use crate::model::ImageRecord;
use crate::state::is_image_filename;

/// Errors from loading or replaying a session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Script or image file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Script is not valid JSON
    #[error("Failed to parse session script: {0}")]
    Parse(#[from] serde_json::Error),

    /// Image bytes could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(#[from] LoaderError),

    /// Export or write failed
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// One export to run after the events are replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Format ID, e.g. `yolo`
    pub format: String,
    /// Export every annotated image instead of the current one
    #[serde(default)]
    pub all_images: bool,
    /// Bundle the output into one archive
    #[serde(default)]
    pub bundle: bool,
}

impl ExportRequest {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            all_images: false,
            bundle: false,
        }
    }

    pub fn options(&self) -> ExportOptions {
        let scope = if self.all_images {
            ExportScope::AllImages
        } else {
            ExportScope::CurrentImage
        };
        ExportOptions::new().scope(scope).bundle(self.bundle)
    }
}

/// A scripted editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionScript {
    pub images: Vec<PathBuf>,
    pub labels: Vec<String>,
    pub active_label: Option<String>,
    pub events: Vec<EditorEvent>,
    pub exports: Vec<ExportRequest>,
}

impl SessionScript {
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a script, resolving relative image paths against its directory.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let json = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut script = Self::from_json(&json)?;

        if let Some(dir) = path.parent() {
            for image in &mut script.images {
                if image.is_relative() {
                    *image = dir.join(&*image);
                }
            }
        }

        log::debug!(
            "Loaded session {}: {} images, {} events, {} exports",
            path.display(),
            script.images.len(),
            script.events.len(),
            script.exports.len()
        );
        Ok(script)
    }
}

/// Outcome of a replayed session.
#[derive(Debug, Default)]
pub struct SessionReport {
    pub images_loaded: usize,
    pub events_applied: usize,
    /// Advisory messages raised while replaying
    pub advisories: Vec<String>,
    /// Names of every file handed to the writer
    pub files_written: Vec<String>,
    /// Exports that had nothing to write
    pub empty_exports: Vec<String>,
}

fn apply_event(editor: &mut Editor, event: EditorEvent, report: &mut SessionReport) {
    if let Response::Advisory(advisory) = editor.update(event) {
        log::warn!("{}", advisory);
        report.advisories.push(advisory.message().to_string());
    }
}

/// Replay a script against an editor and write its exports.
///
/// `events_applied` counts scripted events only, not the label setup.
pub fn replay(
    editor: &mut Editor,
    script: &SessionScript,
    decoder: &dyn ImageDecoder,
    registry: &FormatRegistry,
    writer: &mut dyn OutputWriter,
) -> Result<SessionReport, SessionError> {
    let mut report = SessionReport::default();

    for path in &script.images {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping image path without a file name: {}", path.display());
            continue;
        };
        if !is_image_filename(name) {
            log::warn!("Skipping non-image file {}", path.display());
            continue;
        }

        let bytes = std::fs::read(path).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })?;
        let decoded = decoder.decode(name, &bytes)?;
        if editor.load_image(ImageRecord::from_decoded(name, &decoded)) {
            report.images_loaded += 1;
        }
    }

    let setup = script
        .labels
        .iter()
        .map(|name| EditorEvent::AddLabel { name: name.clone() })
        .chain(script.active_label.clone().map(|name| EditorEvent::SetActiveLabel {
            name: Some(name),
        }));
    for event in setup {
        apply_event(editor, event, &mut report);
    }
    for event in &script.events {
        apply_event(editor, event.clone(), &mut report);
        report.events_applied += 1;
    }

    for request in &script.exports {
        let Some(output) = editor.export(registry, &request.format, &request.options())? else {
            log::info!("Export {}: nothing to export", request.format);
            report.empty_exports.push(request.format.clone());
            continue;
        };

        for warning in &output.result.warnings {
            match warning.severity {
                WarningSeverity::Info => log::info!("Export {}: {}", request.format, warning.message),
                WarningSeverity::Warning => {
                    log::warn!("Export {}: {}", request.format, warning.message)
                }
            }
        }
        writer.write_all(&output.files)?;
        report
            .files_written
            .extend(output.files.iter().map(|f| f.name.clone()));
        log::info!(
            "Export {}: {} annotations from {} images",
            request.format,
            output.result.annotations_exported,
            output.result.images_exported
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::data::ImageCrateDecoder;
    use crate::format::MemoryWriter;
    use crate::model::EditorMode;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        std::fs::write(dir.join(name), bytes).unwrap();
    }

    /// Editor whose surface matches an 800x600 image exactly.
    fn editor() -> Editor {
        let mut config = AppConfig::default();
        config.preferences.viewport_width = 820.0;
        config.preferences.viewport_height = 620.0;
        Editor::from_config(&config)
    }

    #[test]
    fn test_parse_script() {
        let json = r#"{
            "images": ["a.png"],
            "labels": ["cat"],
            "events": [
                { "type": "set_mode", "mode": "polygon" },
                { "type": "key", "key": "enter" }
            ],
            "exports": [{ "format": "coco" }]
        }"#;

        let script = SessionScript::from_json(json).unwrap();
        assert_eq!(script.images, vec![PathBuf::from("a.png")]);
        assert_eq!(script.active_label, None);
        assert_eq!(
            script.events[0],
            EditorEvent::SetMode {
                mode: EditorMode::Polygon
            }
        );
        assert_eq!(script.exports, vec![ExportRequest::new("coco")]);
        assert!(SessionScript::from_json("{ nope").is_err());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{ "images": ["a.png", "/abs/b.png"] }"#).unwrap();

        let script = SessionScript::load(&path).unwrap();
        assert_eq!(script.images[0], dir.path().join("a.png"));
        assert_eq!(script.images[1], PathBuf::from("/abs/b.png"));
        assert!(matches!(
            SessionScript::load(&dir.path().join("missing.json")),
            Err(SessionError::Io { .. })
        ));
    }

    #[test]
    fn test_replay_box_session() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "one.png", 800, 600);
        write_png(dir.path(), "two.png", 800, 600);

        let script = SessionScript {
            images: vec![
                dir.path().join("one.png"),
                dir.path().join("two.png"),
                dir.path().join("notes.txt"),
            ],
            labels: vec!["cat".to_string(), "dog".to_string()],
            active_label: Some("dog".to_string()),
            events: vec![
                EditorEvent::PointerDown { x: 200.0, y: 150.0 },
                EditorEvent::PointerMove { x: 600.0, y: 450.0 },
                EditorEvent::PointerUp { x: 600.0, y: 450.0 },
            ],
            exports: vec![
                ExportRequest::new("yolo"),
                ExportRequest {
                    format: "yolo".to_string(),
                    all_images: true,
                    bundle: true,
                },
            ],
        };

        let mut editor = editor();
        let mut writer = MemoryWriter::new();
        let report = replay(
            &mut editor,
            &script,
            &ImageCrateDecoder,
            &FormatRegistry::new(),
            &mut writer,
        )
        .unwrap();

        assert_eq!(report.images_loaded, 2);
        assert_eq!(report.events_applied, 3);
        assert!(report.advisories.is_empty());
        assert_eq!(report.files_written, vec!["one.txt", "annotations.zip"]);
        assert_eq!(
            writer.get("one.txt").unwrap().as_text(),
            Some("1 0.5 0.5 0.5 0.5\n")
        );
    }

    #[test]
    fn test_replay_fails_on_unavailable_export() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "one.png", 800, 600);

        let script = SessionScript {
            images: vec![dir.path().join("one.png")],
            events: vec![EditorEvent::PointerDown { x: 10.0, y: 10.0 }],
            exports: vec![ExportRequest::new("mask")],
            ..SessionScript::default()
        };

        let mut editor = editor();
        let mut writer = MemoryWriter::new();
        let result = replay(
            &mut editor,
            &script,
            &ImageCrateDecoder,
            &FormatRegistry::new(),
            &mut writer,
        );

        // Mask export is not offered in box mode.
        assert!(matches!(
            result,
            Err(SessionError::Format(FormatError::UnavailableInMode { .. }))
        ));
        assert!(writer.files.is_empty());
    }

    #[test]
    fn test_replay_empty_export() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "one.png", 64, 48);

        let script = SessionScript {
            images: vec![dir.path().join("one.png")],
            labels: vec!["cat".to_string()],
            events: vec![EditorEvent::PointerDown { x: 10.0, y: 10.0 }],
            exports: vec![ExportRequest {
                format: "yolo".to_string(),
                all_images: true,
                bundle: true,
            }],
            ..SessionScript::default()
        };

        let mut editor = editor();
        let mut writer = MemoryWriter::new();
        let report = replay(
            &mut editor,
            &script,
            &ImageCrateDecoder,
            &FormatRegistry::new(),
            &mut writer,
        )
        .unwrap();

        assert_eq!(report.events_applied, 1);
        assert_eq!(report.advisories.len(), 1);
        assert_eq!(report.empty_exports, vec!["yolo"]);
        assert!(writer.files.is_empty());
    }

    #[test]
    fn test_replay_missing_image_fails() {
        let script = SessionScript {
            images: vec![PathBuf::from("/definitely/not/here.png")],
            ..SessionScript::default()
        };
        let result = replay(
            &mut editor(),
            &script,
            &ImageCrateDecoder,
            &FormatRegistry::new(),
            &mut MemoryWriter::new(),
        );
        assert!(matches!(result, Err(SessionError::Io { .. })));
    }
}
