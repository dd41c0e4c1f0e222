//! Pixel access functions
//!
//! Read-only addressing into a [`PixelBuffer`]. Offsets are
//! `(y * width + x) * channel_count`; all returned slices are exactly one
//! pixel or one row long.

use super::PixelBuffer;
use std::slice::ChunksExact;

/// Iterator over the pixels of a buffer in row-major order.
pub type Pixels<'a> = ChunksExact<'a, u8>;

impl PixelBuffer {
    /// Get the bytes of the pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.channels.count() as usize;
        let start = y as usize * self.stride() + x as usize * bpp;
        Some(&self.data[start..start + bpp])
    }

    /// Get the bytes of row `y`.
    ///
    /// Returns `None` if `y` is out of bounds.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.stride();
        let start = y as usize * stride;
        Some(&self.data[start..start + stride])
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> ChunksExact<'_, u8> {
        self.data.chunks_exact(self.stride())
    }

    /// Iterate over pixels, row-major.
    pub fn pixels(&self) -> Pixels<'_> {
        self.data.chunks_exact(self.channels.count() as usize)
    }
}
