//! Channel normalization
//!
//! Decoders see grayscale, grayscale+alpha and palette-indexed sources.
//! These helpers expand them into the two layouts a [`PixelBuffer`]
//! supports, so the upscaler never has to know about them.
//!
//! Rules:
//! - gray becomes RGB with `r = g = b = gray`
//! - gray+alpha becomes RGBA with the alpha kept
//! - palette indices become RGB, or RGBA if a transparency table is given
//!
//! [`PixelBuffer`]: super::PixelBuffer

use super::Channels;

/// Expand 8-bit gray samples to RGB triples.
pub fn gray_to_rgb(gray: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(gray.len() * 3);
    for &g in gray {
        out.extend_from_slice(&[g, g, g]);
    }
    out
}

/// Expand interleaved 8-bit gray+alpha pairs to RGBA quads.
///
/// A trailing odd byte is ignored.
pub fn gray_alpha_to_rgba(gray_alpha: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(gray_alpha.len() * 2);
    for ga in gray_alpha.chunks_exact(2) {
        out.extend_from_slice(&[ga[0], ga[0], ga[0], ga[1]]);
    }
    out
}

/// Look up palette indices.
///
/// # Arguments
///
/// * `indices` - One byte per pixel
/// * `palette` - RGB triples; a trailing partial triple is ignored
/// * `alpha` - Optional per-entry alpha; entries past its end are opaque
///
/// # Returns
///
/// The output layout and the expanded data, or `None` if an index points
/// past the end of the palette.
pub fn expand_palette(
    indices: &[u8],
    palette: &[u8],
    alpha: Option<&[u8]>,
) -> Option<(Channels, Vec<u8>)> {
    let entries: Vec<&[u8]> = palette.chunks_exact(3).collect();
    match alpha {
        Some(alpha) => {
            let mut out = Vec::with_capacity(indices.len() * 4);
            for &i in indices {
                let rgb = entries.get(i as usize)?;
                let a = alpha.get(i as usize).copied().unwrap_or(255);
                out.extend_from_slice(rgb);
                out.push(a);
            }
            Some((Channels::Rgba, out))
        }
        None => {
            let mut out = Vec::with_capacity(indices.len() * 3);
            for &i in indices {
                out.extend_from_slice(entries.get(i as usize)?);
            }
            Some((Channels::Rgb, out))
        }
    }
}
