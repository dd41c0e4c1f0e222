//! WebP image format support
//!
//! Reads still WebP images, lossy or lossless, with the `image-webp`
//! crate. Animated WebP images are rejected.

use crate::{DecodeError, DecodeResult};
use image_webp::WebPDecoder;
use std::io::{BufRead, Seek};
use texscale_core::{Channels, PixelBuffer};

/// Read a WebP image
///
/// The resulting buffer is RGBA if the image has an alpha channel and
/// RGB otherwise.
pub fn read_webp<R: BufRead + Seek>(reader: R) -> DecodeResult<PixelBuffer> {
    let mut decoder = WebPDecoder::new(reader).map_err(decode_error)?;

    if decoder.is_animated() {
        return Err(DecodeError::UnsupportedFormat(
            "animated WebP not supported".to_string(),
        ));
    }

    let (width, height) = decoder.dimensions();
    let channels = if decoder.has_alpha() {
        Channels::Rgba
    } else {
        Channels::Rgb
    };

    let buffer_size = decoder.output_buffer_size().ok_or_else(|| {
        DecodeError::CorruptData("WebP output size overflows".to_string())
    })?;
    let mut buffer = vec![0u8; buffer_size];
    decoder.read_image(&mut buffer).map_err(decode_error)?;

    Ok(PixelBuffer::new(width, height, channels, buffer)?)
}

fn decode_error(err: image_webp::DecodingError) -> DecodeError {
    DecodeError::CorruptData(format!("WebP: {}", err))
}
