//! Global constants for the editor core

/// Per-axis pixel tolerance for grabbing a box resize handle.
pub const HANDLE_HIT_TOLERANCE: f64 = 4.0;

/// Per-axis pixel tolerance for grabbing an in-progress polygon vertex.
pub const VERTEX_HIT_TOLERANCE: f64 = 6.0;

/// A new box drag must exceed this many pixels on both axes to be kept.
pub const MIN_DRAG_DISTANCE: f64 = 3.0;

/// Smallest width/height (pixels) a box can be resized to.
pub const MIN_BOX_SIZE: f64 = 1.0;

/// Minimum number of vertices required for a valid polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Padding subtracted from the viewport before fitting the surface.
pub const SURFACE_PADDING: f64 = 20.0;

/// Viewport assumed until the host reports one.
pub const DEFAULT_VIEWPORT: (f64, f64) = (1280.0, 800.0);

/// Stroke/fill color used when a shape's label has no color.
pub const FALLBACK_COLOR: [u8; 3] = [0xe1, 0x1d, 0x48];

/// File name of the batch box-list archive.
pub const BOX_ARCHIVE_NAME: &str = "annotations.zip";

/// File name of the structured polygon document.
pub const COCO_FILE_NAME: &str = "annotations_coco.json";
