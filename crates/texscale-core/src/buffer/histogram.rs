//! Color statistics
//!
//! Used to check that a transform introduced no new colors.

use super::PixelBuffer;
use std::collections::HashSet;

impl PixelBuffer {
    /// Set of distinct pixel values (all channels compared together).
    pub fn distinct_pixels(&self) -> HashSet<&[u8]> {
        self.pixels().collect()
    }

    /// Number of distinct pixel values.
    pub fn count_colors(&self) -> usize {
        self.distinct_pixels().len()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Channels, PixelBuffer};

    #[test]
    fn test_distinct_pixels() {
        let buf = PixelBuffer::from_fn(4, 4, Channels::Rgb, |x, _, px| {
            px.copy_from_slice(&[(x % 2) as u8 * 200, 0, 0]);
        })
        .unwrap();
        let colors = buf.distinct_pixels();
        assert_eq!(colors.len(), 2);
        assert!(colors.contains(&[0, 0, 0][..]));
        assert!(colors.contains(&[200, 0, 0][..]));
    }

    #[test]
    fn test_alpha_distinguishes_colors() {
        let buf = PixelBuffer::new(2, 1, Channels::Rgba, vec![9, 9, 9, 0, 9, 9, 9, 255]).unwrap();
        assert_eq!(buf.count_colors(), 2);
    }
}
