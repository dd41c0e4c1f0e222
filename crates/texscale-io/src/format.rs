//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header.
//! The file extension is never consulted.

use crate::{DecodeError, DecodeResult};
use texscale_core::ImageFormat;

/// Magic numbers for image format detection
mod magic {
    /// BMP: "BM"
    pub const BMP: &[u8] = b"BM";

    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// GIF87a
    pub const GIF87A: &[u8] = b"GIF87a";

    /// GIF89a
    pub const GIF89A: &[u8] = b"GIF89a";

    /// WebP: RIFF....WEBP
    pub const RIFF: &[u8] = b"RIFF";
    pub const WEBP: &[u8] = b"WEBP";

    /// TIFF little-endian / big-endian
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];
}

/// Number of leading bytes needed to recognize every supported format.
pub const MAGIC_LEN: usize = 12;

/// Detect image format from the leading bytes of an image.
///
/// # Errors
///
/// [`DecodeError::UnsupportedFormat`] if the data is too short or matches
/// no supported container.
pub fn detect_format(data: &[u8]) -> DecodeResult<ImageFormat> {
    if data.len() < 2 {
        return Err(DecodeError::UnsupportedFormat(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }

    if data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }

    if data.starts_with(magic::GIF87A) || data.starts_with(magic::GIF89A) {
        return Ok(ImageFormat::Gif);
    }

    if data.len() >= MAGIC_LEN && data.starts_with(magic::RIFF) && &data[8..12] == magic::WEBP {
        return Ok(ImageFormat::WebP);
    }

    // Checked last: two bytes match a lot of things
    if data.starts_with(magic::BMP) {
        return Ok(ImageFormat::Bmp);
    }

    if data.starts_with(magic::TIFF_LE) || data.starts_with(magic::TIFF_BE) {
        return Err(DecodeError::UnsupportedFormat(
            "TIFF images are not supported".to_string(),
        ));
    }

    Err(DecodeError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}
