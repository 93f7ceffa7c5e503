//! Render frames.
//!
//! The editor never draws. [`build_frame`] snapshots everything a host needs
//! to paint one frame into a [`Frame`] in surface pixels, and the host hands
//! it to its [`Renderer`].

use crate::app::Editor;
use crate::constants::FALLBACK_COLOR;
use crate::geometry::{self, PixelRect, Surface};
use crate::model::{AnnotationShape, EditorMode};

pub use crate::state::CursorHint;

/// Something that can paint a [`Frame`].
pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}

/// Geometry of a shape in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameShape {
    /// A rectangle (bounding box).
    Rect(PixelRect),
    /// A closed polygon.
    Polygon(Vec<(f64, f64)>),
}

/// A committed shape ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameItem {
    pub shape: FrameShape,
    pub label: String,
    pub color: [u8; 3],
    pub selected: bool,
}

impl FrameItem {
    pub fn new(shape: FrameShape, label: impl Into<String>, color: [u8; 3]) -> Self {
        Self {
            shape,
            label: label.into(),
            color,
            selected: false,
        }
    }

    /// Mark this item as selected.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// The polygon currently being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftPolygon {
    /// Vertices in surface pixels, in click order
    pub vertices: Vec<(f64, f64)>,
    /// Edge from the last vertex to the pointer
    pub preview_edge: Option<((f64, f64), (f64, f64))>,
    /// Vertex being dragged
    pub selected_vertex: Option<usize>,
    pub color: [u8; 3],
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub surface: Surface,
    pub mode: EditorMode,
    /// Name of the image on the surface
    pub image: Option<String>,
    /// Committed shapes, bottom to top
    pub items: Vec<FrameItem>,
    /// Handle centers of the selected box, in [`geometry::Handle::ALL`] order
    pub handles: Vec<(f64, f64)>,
    /// Box being dragged out
    pub drag_preview: Option<PixelRect>,
    pub draft: Option<DraftPolygon>,
    /// Crosshair position, hidden once the pointer leaves
    pub crosshair: Option<(f64, f64)>,
    pub cursor: CursorHint,
    /// `Image i of n`
    pub progress: String,
    /// `x:<px>, y:<py>`
    pub readout: Option<String>,
}

impl Frame {
    /// The selected shape, if any.
    pub fn selected_item(&self) -> Option<&FrameItem> {
        self.items.iter().find(|item| item.selected)
    }
}

/// Snapshot the editor into a frame.
pub fn build_frame(editor: &Editor) -> Frame {
    let Surface { width, height } = editor.surface();
    let state = editor.state();
    let labels = editor.labels();
    let color_of = |label: &str| labels.color_of(label).unwrap_or(FALLBACK_COLOR);

    let items = editor
        .current_annotations()
        .iter()
        .enumerate()
        .map(|(index, annotation)| {
            let (shape, selected) = match &annotation.shape {
                AnnotationShape::BoundingBox(b) => (
                    FrameShape::Rect(geometry::denormalize(b, width, height)),
                    state.selected_box == Some(index),
                ),
                AnnotationShape::Polygon { vertices } => (
                    FrameShape::Polygon(geometry::denormalize_polygon(vertices, width, height)),
                    state.selected_polygon == Some(index),
                ),
            };
            FrameItem::new(shape, &annotation.label, color_of(&annotation.label)).selected(selected)
        })
        .collect();

    let handles = state
        .selected_box
        .and_then(|index| editor.current_annotations().get(index))
        .and_then(|annotation| annotation.shape.pixel_rect(width, height))
        .map(|rect| rect.handle_positions().to_vec())
        .unwrap_or_default();

    let drag_preview = state.drag_preview().map(|(origin, current)| {
        PixelRect::new(
            origin.0.min(current.0),
            origin.1.min(current.1),
            (current.0 - origin.0).abs(),
            (current.1 - origin.1).abs(),
        )
    });

    let active_color = labels.active().map_or(FALLBACK_COLOR, color_of);
    let draft = state.is_drafting().then(|| {
        let vertices = geometry::denormalize_polygon(&state.draft, width, height);
        let preview_edge = vertices.last().copied().zip(state.pointer);
        DraftPolygon {
            vertices,
            preview_edge,
            selected_vertex: state.selected_vertex,
            color: active_color,
        }
    });

    Frame {
        surface: editor.surface(),
        mode: editor.mode(),
        image: editor.current_image().map(|image| image.name.clone()),
        items,
        handles,
        drag_preview,
        draft,
        crosshair: state.pointer,
        cursor: state.cursor,
        progress: editor.progress(),
        readout: editor.coordinate_readout(),
    }
}
