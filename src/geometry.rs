//! Coordinate math between normalized shapes and surface pixels.
//!
//! Shapes are stored normalized to `[0, 1]` as fractions of the display
//! surface. Everything here is a pure function: the caller passes the surface
//! (or true image) size it wants to convert against.
//!
//! ## Coordinate Systems
//!
//! - **Normalized**: `(0, 0)` is the top-left of the surface, `(1, 1)` the
//!   bottom-right. Boxes are center + size.
//! - **Pixel**: surface pixels, top-left origin. Boxes are top-left + size.

use serde::{Deserialize, Serialize};

use crate::constants::{HANDLE_HIT_TOLERANCE, SURFACE_PADDING};

/// Pixel size of the display surface shapes are normalized against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// Normalize a surface pixel position.
    pub fn normalize_point(&self, px: f64, py: f64) -> (f64, f64) {
        (px / self.width, py / self.height)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Fit an image inside the viewport, preserving aspect ratio.
///
/// The viewport loses [`SURFACE_PADDING`] on each axis first; the result is
/// floored to whole pixels and never smaller than 1x1.
pub fn fit_surface(image_width: u32, image_height: u32, viewport_w: f64, viewport_h: f64) -> Surface {
    let avail_w = (viewport_w - SURFACE_PADDING).max(1.0);
    let avail_h = (viewport_h - SURFACE_PADDING).max(1.0);
    let img_w = f64::from(image_width.max(1));
    let img_h = f64::from(image_height.max(1));

    let ratio = (avail_w / img_w).min(avail_h / img_h);
    Surface {
        width: (img_w * ratio).floor().max(1.0),
        height: (img_h * ratio).floor().max(1.0),
    }
}

/// A box in normalized center/size form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormBox {
    pub xc: f64,
    pub yc: f64,
    pub w: f64,
    pub h: f64,
}

impl NormBox {
    pub fn new(xc: f64, yc: f64, w: f64, h: f64) -> Self {
        Self { xc, yc, w, h }
    }

    /// Build a box from two pixel corners in any order.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64, width: f64, height: f64) -> Self {
        let (left, right) = (x1.min(x2), x1.max(x2));
        let (top, bottom) = (y1.min(y2), y1.max(y2));
        Self {
            xc: ((left + right) / 2.0) / width,
            yc: ((top + bottom) / 2.0) / height,
            w: (right - left) / width,
            h: (bottom - top) / height,
        }
    }
}

/// An axis-aligned rectangle in pixels, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive containment test.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }

    /// Pixel positions of all eight handles in enumeration order.
    pub fn handle_positions(&self) -> [(f64, f64); 8] {
        Handle::ALL.map(|handle| handle.anchor(self))
    }
}

/// One of the eight resize handles of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopMid,
    TopRight,
    MidLeft,
    MidRight,
    BottomLeft,
    BottomMid,
    BottomRight,
}

impl Handle {
    /// Hit-test order. The first handle within tolerance wins.
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopMid,
        Handle::TopRight,
        Handle::MidLeft,
        Handle::MidRight,
        Handle::BottomLeft,
        Handle::BottomMid,
        Handle::BottomRight,
    ];

    /// Position of this handle on a rectangle.
    pub fn anchor(&self, rect: &PixelRect) -> (f64, f64) {
        let (left, center, right) = (rect.x, rect.x + rect.w / 2.0, rect.x + rect.w);
        let (top, middle, bottom) = (rect.y, rect.y + rect.h / 2.0, rect.y + rect.h);
        match self {
            Handle::TopLeft => (left, top),
            Handle::TopMid => (center, top),
            Handle::TopRight => (right, top),
            Handle::MidLeft => (left, middle),
            Handle::MidRight => (right, middle),
            Handle::BottomLeft => (left, bottom),
            Handle::BottomMid => (center, bottom),
            Handle::BottomRight => (right, bottom),
        }
    }

    pub fn moves_top(&self) -> bool {
        matches!(self, Handle::TopLeft | Handle::TopMid | Handle::TopRight)
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(
            self,
            Handle::BottomLeft | Handle::BottomMid | Handle::BottomRight
        )
    }

    pub fn moves_left(&self) -> bool {
        matches!(self, Handle::TopLeft | Handle::MidLeft | Handle::BottomLeft)
    }

    pub fn moves_right(&self) -> bool {
        matches!(
            self,
            Handle::TopRight | Handle::MidRight | Handle::BottomRight
        )
    }
}

/// Pixel rectangle of a normalized box on a `width` x `height` surface.
pub fn denormalize(b: &NormBox, width: f64, height: f64) -> PixelRect {
    let w = b.w * width;
    let h = b.h * height;
    PixelRect {
        x: b.xc * width - w / 2.0,
        y: b.yc * height - h / 2.0,
        w,
        h,
    }
}

/// Inverse of [`denormalize`].
pub fn normalize_rect(rect: &PixelRect, width: f64, height: f64) -> NormBox {
    NormBox {
        xc: (rect.x + rect.w / 2.0) / width,
        yc: (rect.y + rect.h / 2.0) / height,
        w: rect.w / width,
        h: rect.h / height,
    }
}

/// Scale every normalized vertex to `width` x `height`.
pub fn denormalize_polygon(points: &[(f64, f64)], width: f64, height: f64) -> Vec<(f64, f64)> {
    points.iter().map(|&(x, y)| (x * width, y * height)).collect()
}

/// Find the handle of `rect` under the pointer using the default tolerance.
pub fn hit_handle(px: f64, py: f64, rect: &PixelRect) -> Option<Handle> {
    hit_handle_within(px, py, rect, HANDLE_HIT_TOLERANCE)
}

/// Find the handle of `rect` within `tolerance` pixels on both axes.
///
/// Handles are tested in [`Handle::ALL`] order, so degenerate boxes whose
/// handles overlap resolve to the earliest one.
pub fn hit_handle_within(px: f64, py: f64, rect: &PixelRect, tolerance: f64) -> Option<Handle> {
    Handle::ALL.into_iter().find(|handle| {
        let (hx, hy) = handle.anchor(rect);
        (px - hx).abs() <= tolerance && (py - hy).abs() <= tolerance
    })
}

/// Even-odd ray casting over a pixel-space vertex ring.
///
/// Points exactly on an edge may land on either side.
pub fn point_in_polygon(points: &[(f64, f64)], px: f64, py: f64) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Index of the first normalized vertex strictly within `tolerance` pixels
/// of the pointer on both axes.
pub fn vertex_hit(
    points: &[(f64, f64)],
    px: f64,
    py: f64,
    width: f64,
    height: f64,
    tolerance: f64,
) -> Option<usize> {
    points.iter().position(|&(x, y)| {
        (px - x * width).abs() < tolerance && (py - y * height).abs() < tolerance
    })
}

/// Apply a handle drag to a pixel rectangle.
///
/// Top/left handles move the origin to the pointer and grow the size by the
/// distance moved; bottom/right handles only change the size. Sizes are
/// clamped to `min_size` so the box never inverts.
pub fn resize_rect(rect: &PixelRect, handle: Handle, px: f64, py: f64, min_size: f64) -> PixelRect {
    let mut out = *rect;

    if handle.moves_top() {
        out.h += rect.y - py;
        out.y = py;
    }
    if handle.moves_bottom() {
        out.h = py - rect.y;
    }
    if handle.moves_left() {
        out.w += rect.x - px;
        out.x = px;
    }
    if handle.moves_right() {
        out.w = px - rect.x;
    }

    out.w = out.w.max(min_size);
    out.h = out.h.max(min_size);
    out
}
