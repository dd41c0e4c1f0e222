//! GIF image format support
//!
//! Reads single-frame GIF images. The frame is placed on the logical
//! screen at its offset; animated GIFs (more than one frame) are
//! rejected rather than silently flattened to their first frame.

use crate::{DecodeError, DecodeResult};
use gif::{ColorOutput, DecodeOptions, MemoryLimit};
use std::io::Read;
use texscale_core::{Channels, PixelBuffer};

/// Read a GIF image
///
/// The result is RGBA when the frame has a transparent color index or
/// does not cover the whole logical screen (uncovered pixels are
/// transparent black); otherwise RGB.
pub fn read_gif<R: Read>(reader: R) -> DecodeResult<PixelBuffer> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::RGBA);
    // Output size is bounded later by the upscaler's byte limit
    options.set_memory_limit(MemoryLimit::Unlimited);

    let mut decoder = options.read_info(reader).map_err(decode_error)?;
    let screen = (u32::from(decoder.width()), u32::from(decoder.height()));

    // Read the first frame
    let frame = decoder
        .read_next_frame()
        .map_err(decode_error)?
        .ok_or_else(|| DecodeError::CorruptData("no frames in GIF".to_string()))?
        .clone();

    // Check for additional frames (animated GIF)
    if decoder.read_next_frame().map_err(decode_error)?.is_some() {
        return Err(DecodeError::UnsupportedFormat(
            "animated GIF not supported".to_string(),
        ));
    }

    let left = u32::from(frame.left);
    let top = u32::from(frame.top);
    let frame_w = u32::from(frame.width);
    let frame_h = u32::from(frame.height);

    // Some encoders write a zero-sized logical screen
    let (width, height) = if screen.0 == 0 || screen.1 == 0 {
        (left + frame_w, top + frame_h)
    } else {
        screen
    };

    let covers_screen = left == 0 && top == 0 && frame_w >= width && frame_h >= height;
    let channels = if frame.transparent.is_none() && covers_screen {
        Channels::Rgb
    } else {
        Channels::Rgba
    };

    let expected = frame_w as usize * frame_h as usize * 4;
    if frame.buffer.len() < expected {
        return Err(DecodeError::CorruptData(format!(
            "GIF frame buffer has {} bytes, expected {}",
            frame.buffer.len(),
            expected
        )));
    }

    // Composite the RGBA frame onto a transparent canvas
    let bpp = channels.count() as usize;
    let mut canvas = vec![0u8; width as usize * height as usize * bpp];
    for fy in 0..frame_h {
        let cy = top + fy;
        if cy >= height {
            break;
        }
        for fx in 0..frame_w {
            let cx = left + fx;
            if cx >= width {
                break;
            }
            let src = (fy as usize * frame_w as usize + fx as usize) * 4;
            let dst = (cy as usize * width as usize + cx as usize) * bpp;
            canvas[dst..dst + bpp].copy_from_slice(&frame.buffer[src..src + bpp]);
        }
    }

    Ok(PixelBuffer::new(width, height, channels, canvas)?)
}

fn decode_error(err: gif::DecodingError) -> DecodeError {
    DecodeError::CorruptData(format!("GIF: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gif::{Encoder, Frame};

    fn encode(
        screen: (u16, u16),
        frames: &[(u16, u16, u16, u16, Vec<u8>)],
        transparent: Option<u8>,
    ) -> Vec<u8> {
        let palette = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, screen.0, screen.1, &palette).unwrap();
            for (left, top, w, h, pixels) in frames {
                let mut frame = Frame::from_indexed_pixels(*w, *h, pixels.clone(), transparent);
                frame.left = *left;
                frame.top = *top;
                encoder.write_frame(&frame).unwrap();
            }
        }
        out
    }

    #[test]
    fn test_read_opaque_frame_is_rgb() {
        let data = encode((2, 2), &[(0, 0, 2, 2, vec![0, 1, 2, 3])], None);
        let buf = read_gif(&data[..]).unwrap();
        assert_eq!(buf.channels(), Channels::Rgb);
        assert_eq!(buf.pixel(0, 0), Some(&[255, 0, 0][..]));
        assert_eq!(buf.pixel(1, 0), Some(&[0, 255, 0][..]));
        assert_eq!(buf.pixel(0, 1), Some(&[0, 0, 255][..]));
        assert_eq!(buf.pixel(1, 1), Some(&[255, 255, 255][..]));
    }

    #[test]
    fn test_read_transparent_index_is_rgba() {
        let data = encode((2, 1), &[(0, 0, 2, 1, vec![0, 3])], Some(3));
        let buf = read_gif(&data[..]).unwrap();
        assert_eq!(buf.channels(), Channels::Rgba);
        assert_eq!(buf.pixel(0, 0), Some(&[255, 0, 0, 255][..]));
        assert_eq!(buf.pixel(1, 0).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_read_offset_frame() {
        let data = encode((3, 3), &[(1, 1, 1, 1, vec![2])], None);
        let buf = read_gif(&data[..]).unwrap();
        assert_eq!(buf.dimensions(), (3, 3));
        assert_eq!(buf.channels(), Channels::Rgba);
        assert_eq!(buf.pixel(1, 1), Some(&[0, 0, 255, 255][..]));
        assert_eq!(buf.pixel(0, 0), Some(&[0, 0, 0, 0][..]));
    }

    #[test]
    fn test_read_animated_rejected() {
        let data = encode(
            (1, 1),
            &[(0, 0, 1, 1, vec![0]), (0, 0, 1, 1, vec![1])],
            None,
        );
        assert!(matches!(
            read_gif(&data[..]),
            Err(DecodeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_read_larger_than_default_limit() {
        // 3800 * 3800 * 4 RGBA bytes exceeds the gif crate's 50 MB default
        let side = 3800u16;
        let pixels: Vec<u8> = (0..u32::from(side) * u32::from(side))
            .map(|i| (i % 4) as u8)
            .collect();
        let data = encode((side, side), &[(0, 0, side, side, pixels)], None);
        let buf = read_gif(&data[..]).unwrap();
        assert_eq!(buf.dimensions(), (3800, 3800));
        assert_eq!(buf.channels(), Channels::Rgb);
        assert_eq!(buf.pixel(1, 0), Some(&[0, 255, 0][..]));
    }

    #[test]
    fn test_read_truncated() {
        let mut data = encode((4, 4), &[(0, 0, 4, 4, vec![1; 16])], None);
        data.truncate(16);
        assert!(matches!(
            read_gif(&data[..]),
            Err(DecodeError::CorruptData(_))
        ));
    }
}
