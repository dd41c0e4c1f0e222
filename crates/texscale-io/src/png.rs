//! PNG image format support
//!
//! PNG is both an input format and the only output format. Reading
//! expands every PNG color type to 8-bit RGB or RGBA; writing is always
//! 8-bit, lossless, with alpha only for RGBA buffers.

use crate::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Limits, Transformations};
use std::io::{BufRead, Seek, Write};
use texscale_core::{Channels, PixelBuffer, convert};

/// Read a PNG image
///
/// Low bit depths and palettes are expanded, `tRNS` transparency becomes
/// an alpha channel and 16-bit samples are stripped to 8 bits. Only the
/// default image of an animated PNG is read.
pub fn read_png<R: BufRead + Seek>(reader: R) -> DecodeResult<PixelBuffer> {
    // Output size is bounded later by the upscaler's byte limit
    let mut decoder = Decoder::new_with_limits(reader, Limits { bytes: usize::MAX });
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(decode_error)?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| DecodeError::CorruptData("PNG output size overflows".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader.next_frame(&mut buf).map_err(decode_error)?;
    buf.truncate(output_info.buffer_size());

    if output_info.bit_depth != BitDepth::Eight {
        return Err(DecodeError::UnsupportedFormat(format!(
            "PNG bit depth {:?} after expansion",
            output_info.bit_depth
        )));
    }

    let (channels, data) = match output_info.color_type {
        ColorType::Rgb => (Channels::Rgb, buf),
        ColorType::Rgba => (Channels::Rgba, buf),
        ColorType::Grayscale => (Channels::Rgb, convert::gray_to_rgb(&buf)),
        ColorType::GrayscaleAlpha => (Channels::Rgba, convert::gray_alpha_to_rgba(&buf)),
        ColorType::Indexed => {
            return Err(DecodeError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    Ok(PixelBuffer::new(
        output_info.width,
        output_info.height,
        channels,
        data,
    )?)
}

/// Write a PNG image
///
/// The writer receives a complete PNG stream, including the `IEND`
/// chunk, when this returns `Ok`.
pub fn write_png<W: Write>(buf: &PixelBuffer, writer: W) -> EncodeResult<()> {
    let color_type = match buf.channels() {
        Channels::Rgb => ColorType::Rgb,
        Channels::Rgba => ColorType::Rgba,
    };

    let mut encoder = Encoder::new(writer, buf.width(), buf.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder.write_header().map_err(encode_error)?;
    writer.write_image_data(buf.data()).map_err(encode_error)?;
    writer.finish().map_err(encode_error)?;

    Ok(())
}

fn decode_error(err: png::DecodingError) -> DecodeError {
    DecodeError::CorruptData(format!("PNG: {}", err))
}

fn encode_error(err: png::EncodingError) -> EncodeError {
    match err {
        png::EncodingError::IoError(e) => EncodeError::Io(e),
        other => EncodeError::Codec(format!("PNG: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_raw(width: u32, height: u32, color: ColorType, depth: BitDepth, data: &[u8]) -> Vec<u8> {
        encode_raw_with(width, height, color, depth, data, |_| {})
    }

    fn encode_raw_with(
        width: u32,
        height: u32,
        color: ColorType,
        depth: BitDepth,
        data: &[u8],
        configure: impl FnOnce(&mut Encoder<'_, &mut Vec<u8>>),
    ) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            configure(&mut encoder);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let buf = PixelBuffer::from_fn(5, 3, Channels::Rgb, |x, y, px| {
            px.copy_from_slice(&[x as u8 * 40, y as u8 * 80, 7]);
        })
        .unwrap();

        let mut encoded = Vec::new();
        write_png(&buf, &mut encoded).unwrap();
        let decoded = read_png(Cursor::new(encoded)).unwrap();

        assert_eq!(decoded, buf);
    }

    #[test]
    fn test_png_roundtrip_rgba() {
        let buf = PixelBuffer::from_fn(4, 4, Channels::Rgba, |x, y, px| {
            px.copy_from_slice(&[255, 0, 0, (x * 16 + y) as u8]);
        })
        .unwrap();

        let mut encoded = Vec::new();
        write_png(&buf, &mut encoded).unwrap();
        let decoded = read_png(Cursor::new(encoded)).unwrap();

        assert_eq!(decoded.channels(), Channels::Rgba);
        assert_eq!(decoded, buf);
    }

    #[test]
    fn test_read_grayscale_expands_to_rgb() {
        let data = encode_raw(2, 1, ColorType::Grayscale, BitDepth::Eight, &[10, 200]);
        let buf = read_png(Cursor::new(data)).unwrap();
        assert_eq!(buf.channels(), Channels::Rgb);
        assert_eq!(buf.data(), &[10, 10, 10, 200, 200, 200]);
    }

    #[test]
    fn test_read_gray_alpha_expands_to_rgba() {
        let data = encode_raw(1, 1, ColorType::GrayscaleAlpha, BitDepth::Eight, &[50, 128]);
        let buf = read_png(Cursor::new(data)).unwrap();
        assert_eq!(buf.channels(), Channels::Rgba);
        assert_eq!(buf.data(), &[50, 50, 50, 128]);
    }

    #[test]
    fn test_read_1bit_grayscale() {
        // 0b1010_0000: pixels 1,0,1,0
        let data = encode_raw(4, 1, ColorType::Grayscale, BitDepth::One, &[0b1010_0000]);
        let buf = read_png(Cursor::new(data)).unwrap();
        assert_eq!(buf.pixel(0, 0), Some(&[255, 255, 255][..]));
        assert_eq!(buf.pixel(1, 0), Some(&[0, 0, 0][..]));
        assert_eq!(buf.pixel(2, 0), Some(&[255, 255, 255][..]));
    }

    #[test]
    fn test_read_16bit_rgb_strips_low_byte() {
        let data = encode_raw(
            1,
            1,
            ColorType::Rgb,
            BitDepth::Sixteen,
            &[0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC],
        );
        let buf = read_png(Cursor::new(data)).unwrap();
        assert_eq!(buf.data(), &[0x12, 0x56, 0x9A]);
    }

    #[test]
    fn test_read_indexed() {
        let data = encode_raw_with(2, 1, ColorType::Indexed, BitDepth::Eight, &[1, 0], |e| {
            e.set_palette(vec![255, 0, 0, 0, 0, 255]);
        });
        let buf = read_png(Cursor::new(data)).unwrap();
        assert_eq!(buf.channels(), Channels::Rgb);
        assert_eq!(buf.data(), &[0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn test_read_indexed_with_transparency() {
        let data = encode_raw_with(2, 1, ColorType::Indexed, BitDepth::Eight, &[0, 1], |e| {
            e.set_palette(vec![255, 0, 0, 0, 0, 255]);
            e.set_trns(vec![0]);
        });
        let buf = read_png(Cursor::new(data)).unwrap();
        assert_eq!(buf.channels(), Channels::Rgba);
        assert_eq!(buf.data(), &[255, 0, 0, 0, 0, 0, 255, 255]);
    }

    #[test]
    fn test_read_truncated() {
        let buf = PixelBuffer::filled(8, 8, Channels::Rgb, &[1, 2, 3]).unwrap();
        let mut encoded = Vec::new();
        write_png(&buf, &mut encoded).unwrap();
        encoded.truncate(encoded.len() / 2);

        assert!(matches!(
            read_png(Cursor::new(encoded)),
            Err(DecodeError::CorruptData(_))
        ));
    }
}
