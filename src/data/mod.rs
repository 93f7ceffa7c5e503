//! Image decoding for the editor.
//!
//! The editor core only needs each image's true pixel size; the raster is
//! kept alongside for renderers that want it. Decoders implement
//! [`ImageDecoder`]:
//!
//! ```rust,ignore
//! use boxpoly::data::{DecodedImage, ImageDecoder, LoaderError};
//!
//! pub struct MyDecoder;
//!
//! impl ImageDecoder for MyDecoder {
//!     fn id(&self) -> &'static str { "mine" }
//!     fn extensions(&self) -> &'static [&'static str] { &["myf"] }
//!     fn can_decode(&self, data: &[u8]) -> bool { /* check magic bytes */ }
//!     fn decode(&self, name: &str, data: &[u8]) -> Result<DecodedImage, LoaderError> { /* ... */ }
//! }
//! ```

mod loader;
pub mod loaders;

pub use loader::{DecodedImage, ImageDecoder, LoaderError};
pub use loaders::ImageCrateDecoder;
