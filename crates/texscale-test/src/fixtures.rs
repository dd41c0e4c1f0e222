//! Image fixtures
//!
//! Test images are generated in code instead of being checked in. The
//! buffer builders give known pixel content; the `*_bytes` functions
//! encode a buffer in each supported input format so decoder tests can
//! start from real container bytes.

use crate::error::{TestError, TestResult};
use texscale_core::{Channels, PixelBuffer};

/// Red, green, blue, white
pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// 2x2 RGB image `[[R, G], [B, W]]`
pub fn quadrants() -> PixelBuffer {
    let data = [RED, GREEN, BLUE, WHITE].concat();
    PixelBuffer::new(2, 2, Channels::Rgb, data).expect("2x2 RGB layout")
}

/// Two-color checkerboard with square cells of `cell` pixels
pub fn checkerboard(width: u32, height: u32, cell: u32, a: &[u8], b: &[u8]) -> PixelBuffer {
    let channels = Channels::from_count(a.len() as u32).expect("3 or 4 channel color");
    PixelBuffer::from_fn(width, height, channels, |x, y, px| {
        let even = ((x / cell) + (y / cell)) % 2 == 0;
        px.copy_from_slice(if even { a } else { b });
    })
    .expect("checkerboard layout")
}

/// RGBA image where every pixel is distinct: red follows x, green
/// follows y, alpha steps through partial transparency
pub fn gradient_rgba(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, Channels::Rgba, |x, y, px| {
        px.copy_from_slice(&[
            (x * 255 / width.max(2).saturating_sub(1)) as u8,
            (y * 255 / height.max(2).saturating_sub(1)) as u8,
            ((x ^ y) & 0xFF) as u8,
            (64 + (x + y) % 192) as u8,
        ]);
    })
    .expect("gradient layout")
}

/// 16x16 grass-block texture: a green band over brown dirt with a dark
/// grid every 4 pixels
pub fn grass_block() -> PixelBuffer {
    const GRASS: [u8; 3] = [0x22, 0x8B, 0x22];
    const DIRT: [u8; 3] = [0x8B, 0x45, 0x13];
    const GRID: [u8; 3] = [0x3C, 0x3C, 0x3C];
    PixelBuffer::from_fn(16, 16, Channels::Rgb, |x, y, px| {
        let color = if x % 4 == 0 || y % 4 == 0 {
            GRID
        } else if y < 4 {
            GRASS
        } else {
            DIRT
        };
        px.copy_from_slice(&color);
    })
    .expect("16x16 RGB layout")
}

/// Encode as PNG with the texscale encoder
pub fn png_bytes(buf: &PixelBuffer) -> TestResult<Vec<u8>> {
    texscale_io::encode_png(buf).map_err(|e| TestError::FixtureEncode {
        format: "PNG",
        message: e.to_string(),
    })
}

/// Encode as baseline JPEG; the alpha channel, if any, is dropped
pub fn jpeg_bytes(buf: &PixelBuffer, quality: u8) -> TestResult<Vec<u8>> {
    let (width, height) = dimensions_u16(buf, "JPEG")?;
    let color = match buf.channels() {
        Channels::Rgb => jpeg_encoder::ColorType::Rgb,
        Channels::Rgba => jpeg_encoder::ColorType::Rgba,
    };
    let mut out = Vec::new();
    jpeg_encoder::Encoder::new(&mut out, quality)
        .encode(buf.data(), width, height, color)
        .map_err(|e| TestError::FixtureEncode {
            format: "JPEG",
            message: e.to_string(),
        })?;
    Ok(out)
}

/// Encode as lossless WebP
pub fn webp_bytes(buf: &PixelBuffer) -> TestResult<Vec<u8>> {
    let color = match buf.channels() {
        Channels::Rgb => image_webp::ColorType::Rgb8,
        Channels::Rgba => image_webp::ColorType::Rgba8,
    };
    let mut out = Vec::new();
    image_webp::WebPEncoder::new(&mut out)
        .encode(buf.data(), buf.width(), buf.height(), color)
        .map_err(|e| TestError::FixtureEncode {
            format: "WebP",
            message: e.to_string(),
        })?;
    Ok(out)
}

/// Encode as a single-frame GIF
///
/// Fully transparent pixels of an RGBA buffer share one transparent
/// palette entry; partial alpha is not representable and is dropped.
/// Fails if the image has more than 256 colors.
pub fn gif_bytes(buf: &PixelBuffer) -> TestResult<Vec<u8>> {
    let (width, height) = dimensions_u16(buf, "GIF")?;
    let too_many = || TestError::FixtureEncode {
        format: "GIF",
        message: "more than 256 colors".to_string(),
    };

    let mut palette: Vec<[u8; 3]> = Vec::new();
    let mut transparent: Option<u8> = None;
    let mut indices = Vec::with_capacity(width as usize * height as usize);

    for px in buf.pixels() {
        let index = if buf.channels().has_alpha() && px[3] == 0 {
            match transparent {
                Some(t) => t,
                None => {
                    palette.push([0, 0, 0]);
                    let t = u8::try_from(palette.len() - 1).map_err(|_| too_many())?;
                    transparent = Some(t);
                    t
                }
            }
        } else {
            let rgb = [px[0], px[1], px[2]];
            let existing = palette
                .iter()
                .enumerate()
                .position(|(i, c)| *c == rgb && Some(i as u8) != transparent);
            let i = match existing {
                Some(i) => i,
                None => {
                    palette.push(rgb);
                    palette.len() - 1
                }
            };
            u8::try_from(i).map_err(|_| too_many())?
        };
        indices.push(index);
    }

    let flat: Vec<u8> = palette.concat();
    let gif_error = |e: gif::EncodingError| TestError::FixtureEncode {
        format: "GIF",
        message: e.to_string(),
    };

    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, width, height, &flat).map_err(gif_error)?;
        let frame = gif::Frame::from_indexed_pixels(width, height, indices, transparent);
        encoder.write_frame(&frame).map_err(gif_error)?;
    }
    Ok(out)
}

/// Encode as an uncompressed bottom-up BMP
///
/// RGB buffers become 24 bpp `BI_RGB`; RGBA buffers become 32 bpp
/// `BI_BITFIELDS` with a `BITMAPV4HEADER` carrying an alpha mask.
pub fn bmp_bytes(buf: &PixelBuffer) -> TestResult<Vec<u8>> {
    const FILE_HEADER_SIZE: u32 = 14;
    let (header_size, bits_per_pixel, compression): (u32, u16, u32) = match buf.channels() {
        Channels::Rgb => (40, 24, 0),
        Channels::Rgba => (108, 32, 3),
    };

    let width = buf.width();
    let height = buf.height();
    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let pixel_data_size = (row_stride * height as usize) as u32;
    let pixel_offset = FILE_HEADER_SIZE + header_size;

    let mut out = Vec::with_capacity((pixel_offset + pixel_data_size) as usize);

    // File header
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(pixel_offset + pixel_data_size).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // Reserved
    out.extend_from_slice(&pixel_offset.to_le_bytes());

    // Info header
    out.extend_from_slice(&header_size.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // Bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // Planes
    out.extend_from_slice(&bits_per_pixel.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes()); // X pixels per meter
    out.extend_from_slice(&2835i32.to_le_bytes()); // Y pixels per meter
    out.extend_from_slice(&0u32.to_le_bytes()); // Colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // Important colors

    if buf.channels() == Channels::Rgba {
        for mask in [0x00FF_0000u32, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000] {
            out.extend_from_slice(&mask.to_le_bytes());
        }
        out.extend_from_slice(b"BGRs"); // LCS_sRGB, little-endian
        out.extend_from_slice(&[0u8; 36 + 12]); // Endpoints, gamma
    }

    // Pixel data (bottom-up)
    let mut row_buffer = vec![0u8; row_stride];
    let bpp = buf.channel_count() as usize;
    let out_bpp = bits_per_pixel as usize / 8;
    for row in buf.rows().rev() {
        row_buffer.fill(0);
        for (x, px) in row.chunks_exact(bpp).enumerate() {
            let dst = &mut row_buffer[x * out_bpp..(x + 1) * out_bpp];
            dst[0] = px[2];
            dst[1] = px[1];
            dst[2] = px[0];
            if out_bpp == 4 {
                dst[3] = px[3];
            }
        }
        out.extend_from_slice(&row_buffer);
    }

    Ok(out)
}

fn dimensions_u16(buf: &PixelBuffer, format: &'static str) -> TestResult<(u16, u16)> {
    match (u16::try_from(buf.width()), u16::try_from(buf.height())) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(TestError::FixtureEncode {
            format,
            message: format!("{}x{} exceeds 65535", buf.width(), buf.height()),
        }),
    }
}
