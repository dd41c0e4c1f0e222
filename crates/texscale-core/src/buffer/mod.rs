//! PixelBuffer - The image container
//!
//! `PixelBuffer` is the only image type in texscale. Decoders produce it,
//! the upscaler reads one and returns a new one, the encoder reads it.
//!
//! # Pixel layout
//!
//! - One byte per sample, samples interleaved per pixel (`R,G,B[,A]`)
//! - Rows are stored top to bottom with no padding between them
//! - `data.len() == width * height * channel_count`, always
//!
//! # Ownership model
//!
//! Fields are private and there is no mutable accessor, so a buffer never
//! changes after construction. Stages that transform an image allocate a
//! new buffer instead of writing into the input.

mod access;
pub mod convert;
mod histogram;

pub use access::Pixels;

use crate::error::{Error, Result};

/// Channel layout of a buffer
///
/// Every buffer is normalized to one of these two layouts before it
/// reaches the upscaler. Grayscale and palette sources are expanded by
/// the decoders through [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Channels {
    /// Red, green, blue
    Rgb = 3,
    /// Red, green, blue, alpha (straight, not premultiplied)
    Rgba = 4,
}

impl Channels {
    /// Create `Channels` from a raw sample count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannelCount`] if `count` is not 3 or 4.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            _ => Err(Error::InvalidChannelCount(count)),
        }
    }

    /// Number of bytes per pixel.
    pub fn count(self) -> u32 {
        self as u32
    }

    /// Whether the layout carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        self == Channels::Rgba
    }
}

/// Image container format
///
/// Detection is by magic bytes; the extension is only used when naming
/// output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JFIF / EXIF JPEG
    Jpeg,
    /// Windows bitmap
    Bmp,
    /// Graphics Interchange Format (first frame only)
    Gif,
    /// WebP, lossy or lossless
    WebP,
}

impl ImageFormat {
    /// Get the conventional file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::WebP => "webp",
        }
    }
}

/// Byte length of a `width x height` image with `channel_count` samples
/// per pixel, enlarged by `factor` on both axes.
///
/// Computed in `u64` so that large images at large factors are detected
/// instead of wrapping. Returns `None` on overflow.
pub fn checked_byte_len(width: u32, height: u32, channel_count: u32, factor: u32) -> Option<u64> {
    let w = u64::from(width).checked_mul(u64::from(factor))?;
    let h = u64::from(height).checked_mul(u64::from(factor))?;
    w.checked_mul(h)?.checked_mul(u64::from(channel_count))
}

/// In-memory RGB or RGBA raster
///
/// # Examples
///
/// ```
/// use texscale_core::{Channels, PixelBuffer};
///
/// let buf = PixelBuffer::new(2, 1, Channels::Rgb, vec![255, 0, 0, 0, 0, 255]).unwrap();
/// assert_eq!(buf.pixel(1, 0), Some(&[0, 0, 255][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw interleaved pixel data.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] if `width` or `height` is zero
    /// - [`Error::SizeOverflow`] if the byte length does not fit in `usize`
    /// - [`Error::DataLengthMismatch`] if `data` has the wrong length
    pub fn new(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        let expected = Self::byte_len(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Create a buffer with every pixel set to `pixel`.
    ///
    /// # Errors
    ///
    /// Same as [`PixelBuffer::new`]; additionally
    /// [`Error::InvalidChannelCount`] if `pixel.len()` does not match
    /// `channels`.
    pub fn filled(width: u32, height: u32, channels: Channels, pixel: &[u8]) -> Result<Self> {
        if pixel.len() != channels.count() as usize {
            return Err(Error::InvalidChannelCount(pixel.len() as u32));
        }
        let len = Self::byte_len(width, height, channels)?;
        let data = pixel.iter().copied().cycle().take(len).collect();
        Self::new(width, height, channels, data)
    }

    /// Create a buffer by evaluating `f(x, y)` for every pixel.
    ///
    /// `f` writes one pixel into the slice it is given, which is exactly
    /// `channels.count()` bytes long.
    pub fn from_fn<F>(width: u32, height: u32, channels: Channels, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32, &mut [u8]),
    {
        let len = Self::byte_len(width, height, channels)?;
        let mut data = vec![0u8; len];
        let bpp = channels.count() as usize;
        for (i, px) in data.chunks_exact_mut(bpp).enumerate() {
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;
            f(x, y, px);
        }
        Self::new(width, height, channels, data)
    }

    fn byte_len(width: u32, height: u32, channels: Channels) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        checked_byte_len(width, height, channels.count(), 1)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(Error::SizeOverflow {
                width,
                height,
                channels: channels.count(),
            })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Channel layout.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Bytes per pixel (3 or 4).
    pub fn channel_count(&self) -> u32 {
        self.channels.count()
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels.count() as usize
    }

    /// Raw interleaved pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
