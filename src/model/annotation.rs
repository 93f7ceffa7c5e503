//! Annotation shape types and the editing mode.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, NormBox, PixelRect};

/// Global editing mode. Decides which shape type pointer input creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Drag out bounding boxes
    #[default]
    Box,
    /// Click out polygon vertices
    Polygon,
}

impl EditorMode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            EditorMode::Box => "Box",
            EditorMode::Polygon => "Polygon",
        }
    }

    /// Get all available modes.
    pub fn all() -> &'static [EditorMode] {
        &[EditorMode::Box, EditorMode::Polygon]
    }
}

/// Shape data for an annotation, normalized to the display surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnnotationShape {
    /// Bounding box in center/size form.
    BoundingBox(NormBox),
    /// Closed polygon ring.
    Polygon { vertices: Vec<(f64, f64)> },
}

impl AnnotationShape {
    /// The mode this shape belongs to.
    pub fn mode(&self) -> EditorMode {
        match self {
            AnnotationShape::BoundingBox(_) => EditorMode::Box,
            AnnotationShape::Polygon { .. } => EditorMode::Polygon,
        }
    }

    pub fn as_box(&self) -> Option<&NormBox> {
        match self {
            AnnotationShape::BoundingBox(b) => Some(b),
            AnnotationShape::Polygon { .. } => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&[(f64, f64)]> {
        match self {
            AnnotationShape::Polygon { vertices } => Some(vertices),
            AnnotationShape::BoundingBox(_) => None,
        }
    }

    /// Check if a surface pixel lies inside this shape.
    pub fn contains_pixel(&self, px: f64, py: f64, width: f64, height: f64) -> bool {
        match self {
            AnnotationShape::BoundingBox(b) => geometry::denormalize(b, width, height).contains(px, py),
            AnnotationShape::Polygon { vertices } => {
                let ring = geometry::denormalize_polygon(vertices, width, height);
                geometry::point_in_polygon(&ring, px, py)
            }
        }
    }

    /// Pixel rectangle of a box shape.
    pub fn pixel_rect(&self, width: f64, height: f64) -> Option<PixelRect> {
        self.as_box().map(|b| geometry::denormalize(b, width, height))
    }
}

/// A committed shape with its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// The shape geometry.
    pub shape: AnnotationShape,
    /// Label name this annotation carries.
    pub label: String,
}

impl Annotation {
    /// Create a new annotation with the given shape and label.
    pub fn new(shape: AnnotationShape, label: impl Into<String>) -> Self {
        Self {
            shape,
            label: label.into(),
        }
    }

    pub fn bounding_box(b: NormBox, label: impl Into<String>) -> Self {
        Self::new(AnnotationShape::BoundingBox(b), label)
    }

    pub fn polygon(vertices: Vec<(f64, f64)>, label: impl Into<String>) -> Self {
        Self::new(AnnotationShape::Polygon { vertices }, label)
    }

    pub fn is_box(&self) -> bool {
        self.shape.mode() == EditorMode::Box
    }

    pub fn is_polygon(&self) -> bool {
        self.shape.mode() == EditorMode::Polygon
    }
}
