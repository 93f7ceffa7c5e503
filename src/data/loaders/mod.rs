//! Built-in image decoders.

mod image_loader;

pub use image_loader::ImageCrateDecoder;
