//! JPEG image format support
//!
//! Reads baseline and progressive JPEG images using the `jpeg-decoder`
//! crate. Grayscale images are expanded to RGB. CMYK and 16-bit
//! (lossless) JPEGs are rejected.
//!
//! JPEG is decode-only here; results are always written as PNG.

use crate::{DecodeError, DecodeResult};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::Read;
use texscale_core::{Channels, PixelBuffer, convert};

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
///
/// # Returns
/// An RGB `PixelBuffer`.
pub fn read_jpeg<R: Read>(reader: R) -> DecodeResult<PixelBuffer> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder.decode().map_err(decode_error)?;
    let info = decoder
        .info()
        .ok_or_else(|| DecodeError::CorruptData("JPEG has no frame header".to_string()))?;

    let data = match info.pixel_format {
        PixelFormat::RGB24 => pixels,
        PixelFormat::L8 => convert::gray_to_rgb(&pixels),
        other => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "JPEG pixel format {:?}",
                other
            )));
        }
    };

    Ok(PixelBuffer::new(
        u32::from(info.width),
        u32::from(info.height),
        Channels::Rgb,
        data,
    )?)
}

fn decode_error(err: jpeg_decoder::Error) -> DecodeError {
    match err {
        jpeg_decoder::Error::Unsupported(feature) => {
            DecodeError::UnsupportedFormat(format!("JPEG feature {:?}", feature))
        }
        other => DecodeError::CorruptData(format!("JPEG: {}", other)),
    }
}
