//! Decoder for standard image formats backed by the `image` crate.

use std::path::Path;

use crate::data::loader::{DecodedImage, ImageDecoder, LoaderError};

/// Decoder for PNG, JPEG, GIF, BMP, TIFF and WebP.
pub struct ImageCrateDecoder;

impl ImageCrateDecoder {
    /// Read and decode a file from disk.
    pub fn decode_file(&self, path: &Path) -> Result<DecodedImage, LoaderError> {
        let name = path.display().to_string();
        let data = std::fs::read(path)
            .map_err(|e| LoaderError::new(format!("Failed to read {}: {}", name, e)).with_loader(self.id()))?;
        self.decode(&name, &data)
    }
}

impl ImageDecoder for ImageCrateDecoder {
    fn id(&self) -> &'static str {
        "image"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "tif", "webp"]
    }

    fn can_decode(&self, data: &[u8]) -> bool {
        // Check common image magic bytes
        if data.len() < 8 {
            return false;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return true;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return true;
        }

        // GIF87a / GIF89a
        if data.starts_with(b"GIF8") {
            return true;
        }

        // BMP: 42 4D (BM)
        if data.starts_with(&[0x42, 0x4D]) {
            return true;
        }

        // TIFF: 49 49 2A 00 (little endian) or 4D 4D 00 2A (big endian)
        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return true;
        }

        // WebP: RIFF....WEBP
        data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP"
    }

    fn decode(&self, name: &str, data: &[u8]) -> Result<DecodedImage, LoaderError> {
        let img = image::load_from_memory(data)
            .map_err(|e| {
                LoaderError::new(format!("Failed to decode {}: {}", name, e)).with_loader(self.id())
            })?
            .to_rgba8();

        log::debug!("Decoded {} ({}x{})", name, img.width(), img.height());
        Ok(DecodedImage::new(img))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_magic_detection_png() {
        let decoder = ImageCrateDecoder;
        let png_magic = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(decoder.can_decode(&png_magic));
    }

    #[test]
    fn test_magic_detection_invalid() {
        let decoder = ImageCrateDecoder;
        let random_data = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        assert!(!decoder.can_decode(&random_data));
    }

    #[test]
    fn test_decode_reports_true_size() {
        let decoded = ImageCrateDecoder.decode("a.png", &png_bytes(100, 50)).unwrap();
        assert_eq!((decoded.width, decoded.height), (100, 50));
    }

    #[test]
    fn test_decode_garbage_fails_with_context() {
        let err = ImageCrateDecoder.decode("junk.png", b"not an image").unwrap_err();
        assert_eq!(err.loader_id, Some("image"));
        assert!(err.message.contains("junk.png"));
    }

    #[test]
    fn test_decode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.png");
        std::fs::write(&path, png_bytes(4, 6)).unwrap();
        let decoded = ImageCrateDecoder.decode_file(&path).unwrap();
        assert_eq!((decoded.width, decoded.height), (4, 6));
        assert!(ImageCrateDecoder.handles_filename("PIC.PNG"));
    }
}
