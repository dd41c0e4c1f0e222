//! I/O error types
//!
//! Decoding and encoding fail in different ways, so each direction has
//! its own error. Format-specific modules map their codec errors into
//! these variants; callers never see a codec crate's error type.

use thiserror::Error;

/// Error type for decoding an image into a [`PixelBuffer`].
///
/// No variant carries a partially decoded image.
///
/// [`PixelBuffer`]: texscale_core::PixelBuffer
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Unknown container, disabled format, or a feature of a known format
    /// that is not handled (animation, CMYK, RLE compression, ...)
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The codec rejected the data, or the decoded data is inconsistent
    #[error("corrupt image data: {0}")]
    CorruptData(String),

    /// The source file is missing or unreadable
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<texscale_core::Error> for DecodeError {
    fn from(err: texscale_core::Error) -> Self {
        DecodeError::CorruptData(err.to_string())
    }
}

/// Error type for encoding a [`PixelBuffer`] as PNG.
///
/// [`PixelBuffer`]: texscale_core::PixelBuffer
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Writing to the destination failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The PNG encoder refused the image
    #[error("encode error: {0}")]
    Codec(String),
}

/// Convenience alias for decode results.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Convenience alias for encode results.
pub type EncodeResult<T> = Result<T, EncodeError>;
