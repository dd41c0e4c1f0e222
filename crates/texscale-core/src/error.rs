//! Error types for texscale-core
//!
//! Every way a [`PixelBuffer`](crate::PixelBuffer) can fail to be
//! constructed is a variant here. Once a buffer exists its layout
//! invariant holds, so no accessor returns this error.

use thiserror::Error;

/// texscale-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Width or height is zero
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Channel count other than 3 (RGB) or 4 (RGBA)
    #[error("invalid channel count: {0} (expected 3 or 4)")]
    InvalidChannelCount(u32),

    /// Pixel data length disagrees with `width * height * channels`
    #[error("pixel data length mismatch: expected {expected} bytes, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    /// `width * height * channels` does not fit in memory addressing
    #[error("image size overflows: {width}x{height}x{channels}")]
    SizeOverflow {
        width: u32,
        height: u32,
        channels: u32,
    },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
