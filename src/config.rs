//! Configuration file support for boxpoly.
//!
//! Settings only: log level, viewport, editor tolerances, keybindings and the
//! initial label list. Annotations themselves are never persisted here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_VIEWPORT, HANDLE_HIT_TOLERANCE, MIN_BOX_SIZE, MIN_DRAG_DISTANCE, MIN_POLYGON_VERTICES,
    VERTEX_HIT_TOLERANCE,
};
use crate::keybindings::KeyBindings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Pointer tolerances and shape limits
    #[serde(default)]
    pub editor: EditorSettings,

    /// Keybinding configuration
    #[serde(default)]
    pub keybindings: KeyBindings,

    /// Labels created at startup, in order
    #[serde(default)]
    pub labels: Vec<String>,
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Viewport width the surface is fitted into
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,

    /// Viewport height the surface is fitted into
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,

    /// Folder exports are written to
    #[serde(default = "default_output_folder")]
    pub output_folder: PathBuf,
}

fn default_viewport_width() -> f64 {
    DEFAULT_VIEWPORT.0
}

fn default_viewport_height() -> f64 {
    DEFAULT_VIEWPORT.1
}

fn default_output_folder() -> PathBuf {
    PathBuf::from("exports")
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            output_folder: default_output_folder(),
        }
    }
}

/// Pointer tolerances and shape limits, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Per-axis distance (inclusive) at which a box handle is grabbed
    pub handle_tolerance: f64,
    /// Per-axis distance (exclusive) at which a draft vertex is grabbed
    pub vertex_tolerance: f64,
    /// Drag distance a new box must exceed on both axes
    pub min_drag_distance: f64,
    /// Smallest width/height a resize can produce
    pub min_box_size: f64,
    /// Vertices needed to finish a polygon
    pub min_polygon_vertices: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            handle_tolerance: HANDLE_HIT_TOLERANCE,
            vertex_tolerance: VERTEX_HIT_TOLERANCE,
            min_drag_distance: MIN_DRAG_DISTANCE,
            min_box_size: MIN_BOX_SIZE,
            min_polygon_vertices: MIN_POLYGON_VERTICES,
        }
    }
}

impl EditorSettings {
    /// Reject limits that would let degenerate shapes through: polygons with
    /// fewer than three vertices, boxes below one pixel, or negative distances.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floors = [
            ("handle_tolerance", self.handle_tolerance, 0.0),
            ("vertex_tolerance", self.vertex_tolerance, 0.0),
            ("min_drag_distance", self.min_drag_distance, 0.0),
            ("min_box_size", self.min_box_size, MIN_BOX_SIZE),
        ];
        for (field, value, floor) in floors {
            if value.is_nan() || value < floor {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{} is below the minimum of {}", value, floor),
                });
            }
        }

        if self.min_polygon_vertices < MIN_POLYGON_VERTICES {
            return Err(ConfigError::Invalid {
                field: "min_polygon_vertices",
                reason: format!(
                    "{} is below the minimum of {}",
                    self.min_polygon_vertices, MIN_POLYGON_VERTICES
                ),
            });
        }

        Ok(())
    }

    /// Raise every limit to its floor. NaN falls back to the floor.
    pub fn clamped(self) -> Self {
        Self {
            handle_tolerance: self.handle_tolerance.max(0.0),
            vertex_tolerance: self.vertex_tolerance.max(0.0),
            min_drag_distance: self.min_drag_distance.max(0.0),
            min_box_size: self.min_box_size.max(MIN_BOX_SIZE),
            min_polygon_vertices: self.min_polygon_vertices.max(MIN_POLYGON_VERTICES),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: UserPreferences::default(),
            editor: EditorSettings::default(),
            keybindings: KeyBindings::default(),
            labels: Vec::new(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.editor.validate()?;
        if let Some((first, second)) = config.keybindings.first_conflict() {
            return Err(ConfigError::Invalid {
                field: "keybindings",
                reason: format!("{} and {} share a key", first.name(), second.name()),
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "boxpoly-config.json"
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing.
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config file found at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A setting is out of range
    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Key;

    #[test]
    fn test_defaults_match_constants() {
        let config = AppConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.editor.handle_tolerance, 4.0);
        assert_eq!(config.editor.vertex_tolerance, 6.0);
        assert_eq!(config.editor.min_drag_distance, 3.0);
        assert_eq!(config.editor.min_polygon_vertices, 3);
        assert_eq!(config.preferences.log_level, LogLevel::Info);
    }

    #[test]
    fn test_minimal_json_fills_defaults() {
        let config = AppConfig::from_json(r#"{"version":1,"labels":["cat","dog"]}"#).unwrap();
        assert_eq!(config.labels, vec!["cat".to_string(), "dog".to_string()]);
        assert_eq!(config.editor, EditorSettings::default());
        assert_eq!(config.keybindings, KeyBindings::default());
    }

    #[test]
    fn test_version_too_new() {
        let err = AppConfig::from_json(r#"{"version":99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                ..
            }
        ));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(AppConfig::default_filename());

        let mut config = AppConfig::new();
        config.preferences.log_level = LogLevel::Debug;
        config.keybindings.box_mode = Key::Char('x');
        config.labels.push("cat".to_string());
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_or_default_bad_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            AppConfig::load_or_default(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_polygon_vertex_floor_rejected() {
        let err = AppConfig::from_json(r#"{"version":1,"editor":{"min_polygon_vertices":0}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "min_polygon_vertices",
                ..
            }
        ));
    }

    #[test]
    fn test_load_rejects_zero_box_limits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.json");
        std::fs::write(
            &path,
            r#"{"version":1,"editor":{"min_box_size":0.0,"min_drag_distance":-1.0}}"#,
        )
        .unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "min_drag_distance",
                ..
            }
        ));

        std::fs::write(&path, r#"{"version":1,"editor":{"min_box_size":0.5}}"#).unwrap();
        assert!(matches!(
            AppConfig::load_or_default(&path),
            Err(ConfigError::Invalid {
                field: "min_box_size",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let err = AppConfig::from_json(r#"{"version":1,"editor":{"vertex_tolerance":-2.0}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "vertex_tolerance",
                ..
            }
        ));
    }

    #[test]
    fn test_clamped_raises_floors() {
        let settings = EditorSettings {
            handle_tolerance: -1.0,
            vertex_tolerance: f64::NAN,
            min_drag_distance: -1.0,
            min_box_size: 0.0,
            min_polygon_vertices: 0,
        }
        .clamped();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.handle_tolerance, 0.0);
        assert_eq!(settings.vertex_tolerance, 0.0);
        assert_eq!(settings.min_drag_distance, 0.0);
        assert_eq!(settings.min_box_size, MIN_BOX_SIZE);
        assert_eq!(settings.min_polygon_vertices, MIN_POLYGON_VERTICES);

        assert_eq!(EditorSettings::default().clamped(), EditorSettings::default());
    }

    #[test]
    fn test_conflicting_keybindings_rejected() {
        let err = AppConfig::from_json(r#"{"version":1,"keybindings":{"box_mode":{"char":"P"}}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "keybindings",
                ..
            }
        ));
        assert!(err.to_string().contains("Box mode and Polygon mode"));
    }
}
