//! Binary mask export for the current image.
//!
//! The mask has the image's true size. Every polygon is filled with a
//! non-zero winding rule, sampling each pixel at its center, in insertion
//! order over a zero background.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};

use crate::format::error::FormatError;
use crate::format::project::ProjectView;
use crate::format::traits::{
    AnnotationFormat, ExportFile, ExportOptions, ExportOutput, ExportResult,
};
use crate::geometry;
use crate::model::{EditorMode, ImageRecord};

/// Foreground value in the raw mask.
pub const MASK_FOREGROUND: u8 = 1;

/// Binary mask format, encoded as an 8-bit grayscale PNG (0 black, 1 white).
pub struct MaskFormat;

/// A raw `width * height` mask, row-major, values 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl BinaryMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Number of foreground pixels.
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v == MASK_FOREGROUND).count()
    }

    /// Fill a pixel-space polygon with the foreground value.
    pub fn fill_polygon(&mut self, ring: &[(f64, f64)]) {
        if ring.len() < 3 {
            return;
        }

        let mut scanline = ScanlineBuffer::new(ring.len());
        let width = self.width as usize;
        for y in 0..self.height {
            let center_y = f64::from(y) + 0.5;
            scanline.collect(ring, center_y);

            let row = y as usize * width;
            for (start, end) in scanline.spans(self.width) {
                self.data[row + start..row + end].fill(MASK_FOREGROUND);
            }
        }
    }

    /// Encode as PNG, scaling foreground to 255.
    pub fn to_png(&self) -> Result<Vec<u8>, FormatError> {
        let img = GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.get(x, y) == MASK_FOREGROUND { 255 } else { 0 }])
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

/// Edge crossings of one scanline, with winding direction.
struct ScanlineBuffer {
    crossings: Vec<(f64, i32)>,
}

impl ScanlineBuffer {
    fn new(max_polygon_points: usize) -> Self {
        Self {
            crossings: Vec::with_capacity(max_polygon_points),
        }
    }

    /// Find where each edge crosses the horizontal line at `y`.
    ///
    /// Edges are half-open in y so a vertex on the line is counted once.
    fn collect(&mut self, ring: &[(f64, f64)], y: f64) {
        self.crossings.clear();

        let n = ring.len();
        for i in 0..n {
            let (x0, y0) = ring[i];
            let (x1, y1) = ring[(i + 1) % n];

            let direction = if y0 <= y && y < y1 {
                1
            } else if y1 <= y && y < y0 {
                -1
            } else {
                continue;
            };

            let x = x0 + (y - y0) * (x1 - x0) / (y1 - y0);
            self.crossings.push((x, direction));
        }

        self.crossings.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    /// Pixel column ranges `[start, end)` whose centers have non-zero winding.
    fn spans(&self, width: u32) -> Vec<(usize, usize)> {
        let max = f64::from(width);
        let mut spans = Vec::new();
        let mut winding = 0;

        for pair in self.crossings.windows(2) {
            winding += pair[0].1;
            if winding == 0 {
                continue;
            }

            // Pixel x is inside when left <= x + 0.5 < right.
            let start = (pair[0].0 - 0.5).ceil().clamp(0.0, max);
            let end = (pair[1].0 - 0.5).ceil().clamp(0.0, max);
            if start < end {
                spans.push((start as usize, end as usize));
            }
        }

        spans
    }
}

/// Rasterize every polygon of `image` at its true size.
///
/// Returns `None` when the image has no polygons.
pub fn rasterize(project: &ProjectView<'_>, image: &ImageRecord) -> Option<BinaryMask> {
    let width = f64::from(image.width);
    let height = f64::from(image.height);

    let mut mask = BinaryMask::new(image.width, image.height);
    let mut filled = 0;
    for vertices in project
        .annotations(image)
        .iter()
        .filter_map(|a| a.shape.as_polygon())
    {
        mask.fill_polygon(&geometry::denormalize_polygon(vertices, width, height));
        filled += 1;
    }

    (filled > 0).then_some(mask)
}

impl AnnotationFormat for MaskFormat {
    fn id(&self) -> &'static str {
        "mask"
    }

    fn display_name(&self) -> &'static str {
        "Binary mask (PNG)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["png"]
    }

    fn modes(&self) -> &[EditorMode] {
        &[EditorMode::Polygon]
    }

    fn export(
        &self,
        project: &ProjectView<'_>,
        _options: &ExportOptions,
    ) -> Result<Option<ExportOutput>, FormatError> {
        let Some(image) = project.current_image() else {
            log::debug!("Mask export skipped: no current image");
            return Ok(None);
        };

        let Some(mask) = rasterize(project, image) else {
            log::debug!("Mask export skipped: {} has no polygons", image.name);
            return Ok(None);
        };

        let polygons = project
            .annotations(image)
            .iter()
            .filter(|a| a.is_polygon())
            .count();
        let png = mask.to_png()?;
        log::info!(
            "Mask export: {} polygons, {}x{} -> {} bytes",
            polygons,
            mask.width,
            mask.height,
            png.len()
        );

        let result = ExportResult {
            images_exported: 1,
            annotations_exported: polygons,
            warnings: Vec::new(),
        };
        Ok(Some(ExportOutput::new(
            vec![ExportFile::new(format!("{}_mask.png", image.base_name()), png)],
            result,
        )))
    }
}
