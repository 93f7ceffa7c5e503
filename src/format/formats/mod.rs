//! Export format implementations.

mod coco;
mod mask;
mod yolo;

#[cfg(test)]
mod tests;

pub use coco::{CocoAnnotation, CocoCategory, CocoDocument, CocoFormat, CocoImage};
pub use mask::{BinaryMask, MASK_FOREGROUND, MaskFormat, rasterize};
pub use yolo::{YoloFormat, box_lines};
