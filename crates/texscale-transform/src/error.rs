//! Error types for texscale-transform

use thiserror::Error;

/// Errors that can occur while upscaling
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] texscale_core::Error),

    /// Scale factor outside the accepted range
    #[error(
        "invalid scale factor: {0} (expected {min}..={max})",
        min = crate::ScaleFactor::MIN,
        max = crate::ScaleFactor::MAX
    )]
    InvalidScaleFactor(u32),

    /// An output side does not fit in `u32`
    #[error("output dimensions overflow: {width}x{height} at {factor}x")]
    DimensionOverflow { width: u32, height: u32, factor: u32 },

    /// Output would exceed the configured byte limit
    ///
    /// `required` is `u64::MAX` when the size overflows 64 bits.
    #[error("result too large: {required} bytes required, limit is {limit}")]
    ResultTooLarge { required: u64, limit: u64 },
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
