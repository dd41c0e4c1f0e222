//! BMP image format support
//!
//! Reads uncompressed Windows Bitmap files:
//!
//! - 1, 4 and 8 bpp with a color table (expanded to RGB)
//! - 24 bpp BGR
//! - 32 bpp `BI_RGB` (fourth byte ignored, RGB result)
//! - 32 bpp `BI_BITFIELDS` with the standard byte-aligned masks
//!   (RGBA result when an alpha mask is present)
//!
//! RLE and JPEG/PNG-in-BMP compression are rejected.

use crate::{DecodeError, DecodeResult};
use texscale_core::{Channels, PixelBuffer, convert};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: usize = 40;

/// Compression: none
const BI_RGB: u32 = 0;

/// Compression: channel bit masks
const BI_BITFIELDS: u32 = 3;

/// Standard 32 bpp masks: (red, green, blue)
const STANDARD_MASKS: (u32, u32, u32) = (0x00FF_0000, 0x0000_FF00, 0x0000_00FF);

/// Standard 32 bpp alpha mask
const ALPHA_MASK: u32 = 0xFF00_0000;

fn le_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn le_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn truncated(what: &str) -> DecodeError {
    DecodeError::CorruptData(format!("BMP truncated in {}", what))
}

/// Read a BMP image from its complete file contents.
pub fn read_bmp(data: &[u8]) -> DecodeResult<PixelBuffer> {
    if data.len() < BMP_FILE_HEADER_SIZE + 4 {
        return Err(truncated("file header"));
    }

    // Verify magic number
    if &data[0..2] != b"BM" {
        return Err(DecodeError::CorruptData("not a BMP file".to_string()));
    }

    let pixel_offset = le_u32(data, 10) as usize;

    let header_size = le_u32(data, BMP_FILE_HEADER_SIZE) as usize;
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(DecodeError::UnsupportedFormat(format!(
            "BMP header size {} (OS/2 bitmaps are not supported)",
            header_size
        )));
    }
    let info_end = BMP_FILE_HEADER_SIZE
        .checked_add(header_size)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| truncated("info header"))?;
    let info = &data[BMP_FILE_HEADER_SIZE..info_end];

    let width = le_u32(info, 4) as i32;
    let height = le_u32(info, 8) as i32;

    let planes = le_u16(info, 12);
    if planes != 1 {
        return Err(DecodeError::CorruptData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }

    let bits_per_pixel = le_u16(info, 14);
    let compression = le_u32(info, 16);
    let colors_used = le_u32(info, 32) as usize;

    if width <= 0 || height == 0 {
        return Err(DecodeError::CorruptData(format!(
            "invalid BMP dimensions: {}x{}",
            width, height
        )));
    }
    let width = width.unsigned_abs();
    let top_down = height < 0;
    let height = height.unsigned_abs();

    // Channel masks follow a 40-byte header, or live inside a larger one
    let mut cursor = info_end;
    let channels = match (compression, bits_per_pixel) {
        (BI_RGB, 1 | 4 | 8 | 24 | 32) => Channels::Rgb,
        (BI_BITFIELDS, 32) => {
            let masks = if header_size >= 52 {
                (le_u32(info, 40), le_u32(info, 44), le_u32(info, 48))
            } else {
                if data.len() < cursor + 12 {
                    return Err(truncated("bit masks"));
                }
                let masks = (
                    le_u32(data, cursor),
                    le_u32(data, cursor + 4),
                    le_u32(data, cursor + 8),
                );
                cursor += 12;
                masks
            };
            if masks != STANDARD_MASKS {
                return Err(DecodeError::UnsupportedFormat(format!(
                    "BMP bit masks {:08x}/{:08x}/{:08x}",
                    masks.0, masks.1, masks.2
                )));
            }
            if header_size >= 56 && le_u32(info, 52) == ALPHA_MASK {
                Channels::Rgba
            } else {
                Channels::Rgb
            }
        }
        (BI_RGB | BI_BITFIELDS, _) => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "unsupported BMP bit depth: {}",
                bits_per_pixel
            )));
        }
        _ => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "unsupported BMP compression: {}",
                compression
            )));
        }
    };

    // Read color table if present (for 1, 4, 8 bit images), stored BGRX
    let palette = if bits_per_pixel <= 8 {
        let max_colors = 1usize << bits_per_pixel;
        let num_colors = if colors_used == 0 {
            max_colors
        } else {
            colors_used
        };
        if num_colors > max_colors {
            return Err(DecodeError::CorruptData(format!(
                "BMP color table has {} entries for {} bpp",
                num_colors, bits_per_pixel
            )));
        }
        let table_end = cursor + num_colors * 4;
        if data.len() < table_end {
            return Err(truncated("color table"));
        }
        let rgb: Vec<u8> = data[cursor..table_end]
            .chunks_exact(4)
            .flat_map(|bgrx| [bgrx[2], bgrx[1], bgrx[0]])
            .collect();
        cursor = table_end;
        Some(rgb)
    } else {
        None
    };

    if pixel_offset < cursor {
        return Err(DecodeError::CorruptData(format!(
            "BMP pixel offset {} overlaps headers",
            pixel_offset
        )));
    }

    // Rows are 4-byte aligned; check the whole pixel array is present
    // before allocating anything sized by the header
    let row_stride = (u64::from(width) * u64::from(bits_per_pixel)).div_ceil(32) * 4;
    let pixel_bytes = row_stride
        .checked_mul(u64::from(height))
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| truncated("pixel data"))?;
    let row_stride = row_stride as usize;
    let pixels_end = pixel_offset
        .checked_add(pixel_bytes)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| truncated("pixel data"))?;
    let pixel_data = &data[pixel_offset..pixels_end];

    let bpp = channels.count() as usize;
    let mut out = Vec::with_capacity(width as usize * height as usize * bpp);
    let mut indices = Vec::with_capacity(width as usize);

    for y in 0..height as usize {
        let src_row = if top_down { y } else { height as usize - 1 - y };
        let row = &pixel_data[src_row * row_stride..(src_row + 1) * row_stride];

        match bits_per_pixel {
            1 | 4 | 8 => {
                indices.clear();
                for x in 0..width as usize {
                    let idx = match bits_per_pixel {
                        1 => (row[x / 8] >> (7 - (x % 8))) & 1,
                        4 if x % 2 == 0 => row[x / 2] >> 4,
                        4 => row[x / 2] & 0xF,
                        _ => row[x],
                    };
                    indices.push(idx);
                }
                let (_, rgb) = convert::expand_palette(
                    &indices,
                    palette.as_deref().unwrap_or_default(),
                    None,
                )
                .ok_or_else(|| {
                    DecodeError::CorruptData("BMP pixel refers past color table".to_string())
                })?;
                out.extend_from_slice(&rgb);
            }
            24 => {
                for bgr in row.chunks_exact(3).take(width as usize) {
                    out.extend_from_slice(&[bgr[2], bgr[1], bgr[0]]);
                }
            }
            32 => {
                for bgra in row.chunks_exact(4).take(width as usize) {
                    out.extend_from_slice(&[bgra[2], bgra[1], bgra[0]]);
                    if channels == Channels::Rgba {
                        out.push(bgra[3]);
                    }
                }
            }
            _ => unreachable!("bit depth validated above"),
        }
    }

    Ok(PixelBuffer::new(width, height, channels, out)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a BITMAPINFOHEADER bitmap from already padded rows.
    fn bmp_bytes(width: i32, height: i32, bpp: u16, palette: &[[u8; 4]], rows: &[u8]) -> Vec<u8> {
        let offset = (BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE + palette.len() * 4) as u32;
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(offset + rows.len() as u32).to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&offset.to_le_bytes());
        out.extend_from_slice(&(BMP_INFO_HEADER_SIZE as u32).to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&bpp.to_le_bytes());
        out.extend_from_slice(&BI_RGB.to_le_bytes());
        out.extend_from_slice(&(rows.len() as u32).to_le_bytes());
        out.extend_from_slice(&[0; 8]);
        out.extend_from_slice(&(palette.len() as u32).to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        for entry in palette {
            out.extend_from_slice(entry);
        }
        out.extend_from_slice(rows);
        out
    }

    #[test]
    fn test_read_24bpp_bottom_up() {
        // 2x2, rows padded to 8 bytes; bottom row stored first
        let rows = [
            0, 0, 255, 0, 255, 0, 0, 0, // bottom: red, green
            255, 0, 0, 255, 255, 255, 0, 0, // top: blue, white
        ];
        let buf = read_bmp(&bmp_bytes(2, 2, 24, &[], &rows)).unwrap();
        assert_eq!(buf.channels(), Channels::Rgb);
        assert_eq!(buf.pixel(0, 0), Some(&[0, 0, 255][..]));
        assert_eq!(buf.pixel(1, 0), Some(&[255, 255, 255][..]));
        assert_eq!(buf.pixel(0, 1), Some(&[255, 0, 0][..]));
        assert_eq!(buf.pixel(1, 1), Some(&[0, 255, 0][..]));
    }

    #[test]
    fn test_read_24bpp_top_down() {
        let rows = [0, 0, 255, 0, 0, 255, 0, 0];
        let buf = read_bmp(&bmp_bytes(1, -2, 24, &[], &rows)).unwrap();
        assert_eq!(buf.pixel(0, 0), Some(&[255, 0, 0][..]));
        assert_eq!(buf.pixel(0, 1), Some(&[0, 255, 0][..]));
    }

    #[test]
    fn test_read_1bpp_palette() {
        let palette = [[0, 0, 0, 0], [0, 200, 100, 0]];
        let rows = [0b0100_0000, 0, 0, 0];
        let buf = read_bmp(&bmp_bytes(3, 1, 1, &palette, &rows)).unwrap();
        assert_eq!(buf.data(), &[0, 0, 0, 100, 200, 0, 0, 0, 0]);
    }

    #[test]
    fn test_read_8bpp_index_past_table() {
        let palette = [[1, 2, 3, 0]];
        let rows = [5, 0, 0, 0];
        assert!(matches!(
            read_bmp(&bmp_bytes(1, 1, 8, &palette, &rows)),
            Err(DecodeError::CorruptData(_))
        ));
    }

    #[test]
    fn test_read_32bpp_rgb_ignores_fourth_byte() {
        let rows = [10, 20, 30, 0];
        let buf = read_bmp(&bmp_bytes(1, 1, 32, &[], &rows)).unwrap();
        assert_eq!(buf.channels(), Channels::Rgb);
        assert_eq!(buf.data(), &[30, 20, 10]);
    }

    #[test]
    fn test_read_truncated_pixels() {
        let mut bytes = bmp_bytes(4, 4, 24, &[], &[0; 48]);
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(read_bmp(&bytes), Err(DecodeError::CorruptData(_))));
    }

    #[test]
    fn test_read_rle_rejected() {
        let mut bytes = bmp_bytes(1, 1, 8, &[[0, 0, 0, 0]], &[0, 0, 0, 0]);
        bytes[BMP_FILE_HEADER_SIZE + 16] = 1; // BI_RLE8
        assert!(matches!(
            read_bmp(&bytes),
            Err(DecodeError::UnsupportedFormat(_))
        ));
    }
}
