//! Nearest-neighbor integer upscaling
//!
//! Output pixel `(ox, oy)` is source pixel `(ox / factor, oy / factor)`.
//! Each source row is expanded once into an output row by repeating every
//! pixel `factor` times; that row is then copied `factor` times. Pixels
//! are moved as whole byte groups, so RGB and RGBA take the same path.
//!
//! The output size is computed in `u64` and checked against
//! [`UpscaleOptions::max_output_bytes`] before any allocation.

use crate::{TransformError, TransformResult};
use std::fmt;
use texscale_core::{Channels, PixelBuffer, checked_byte_len};
use tracing::debug;

/// Default output limit: 1 GiB
pub const DEFAULT_MAX_OUTPUT_BYTES: u64 = 1 << 30;

/// Integer scale factor in `ScaleFactor::MIN..=ScaleFactor::MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaleFactor(u32);

impl ScaleFactor {
    /// Smallest accepted factor
    pub const MIN: u32 = 2;
    /// Largest accepted factor
    pub const MAX: u32 = 64;

    /// Validate a factor.
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn new(factor: u32) -> TransformResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&factor) {
            Ok(Self(factor))
        } else {
            Err(TransformError::InvalidScaleFactor(factor))
        }
    }

    /// The factor as an integer
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ScaleFactor {
    type Error = TransformError;

    fn try_from(factor: u32) -> TransformResult<Self> {
        Self::new(factor)
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Options for [`upscale_with_options`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpscaleOptions {
    /// Largest output, in bytes, the call may allocate
    pub max_output_bytes: u64,
}

impl Default for UpscaleOptions {
    fn default() -> Self {
        Self {
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

impl UpscaleOptions {
    /// Set the output byte limit
    pub fn with_max_output_bytes(mut self, max_output_bytes: u64) -> Self {
        self.max_output_bytes = max_output_bytes;
        self
    }
}

/// Output geometry of an accepted upscale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpscalePlan {
    /// Validated factor
    pub factor: ScaleFactor,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Output pixel data length in bytes
    pub byte_len: u64,
}

/// Compute the output of upscaling `buf` without allocating it.
///
/// # Errors
///
/// - [`TransformError::InvalidScaleFactor`] if `factor` is out of range
/// - [`TransformError::DimensionOverflow`] if an output side does not
///   fit in `u32`
/// - [`TransformError::ResultTooLarge`] if the output exceeds
///   `options.max_output_bytes` or its byte length overflows `u64`
pub fn plan_upscale(
    buf: &PixelBuffer,
    factor: u32,
    options: &UpscaleOptions,
) -> TransformResult<UpscalePlan> {
    plan_upscale_dimensions(buf.width(), buf.height(), buf.channels(), factor, options)
}

/// Same as [`plan_upscale`], for an image that has not been decoded yet.
pub fn plan_upscale_dimensions(
    width: u32,
    height: u32,
    channels: Channels,
    factor: u32,
    options: &UpscaleOptions,
) -> TransformResult<UpscalePlan> {
    let factor = ScaleFactor::new(factor)?;
    let limit = options.max_output_bytes;
    let too_large = |required| TransformError::ResultTooLarge { required, limit };

    let (out_width, out_height) = match (
        width.checked_mul(factor.get()),
        height.checked_mul(factor.get()),
    ) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(TransformError::DimensionOverflow {
                width,
                height,
                factor: factor.get(),
            });
        }
    };

    match checked_byte_len(width, height, channels.count(), factor.get()) {
        Some(byte_len) if byte_len <= limit => Ok(UpscalePlan {
            factor,
            width: out_width,
            height: out_height,
            byte_len,
        }),
        Some(byte_len) => Err(too_large(byte_len)),
        None => Err(too_large(u64::MAX)),
    }
}

/// Upscale with the default output limit.
///
/// # Examples
///
/// ```
/// use texscale_core::{Channels, PixelBuffer};
///
/// let src = PixelBuffer::new(1, 1, Channels::Rgb, vec![9, 8, 7]).unwrap();
/// let out = texscale_transform::upscale(&src, 3).unwrap();
/// assert_eq!(out.dimensions(), (3, 3));
/// assert!(out.pixels().all(|p| p == [9, 8, 7]));
/// ```
pub fn upscale(buf: &PixelBuffer, factor: u32) -> TransformResult<PixelBuffer> {
    upscale_with_options(buf, factor, &UpscaleOptions::default())
}

/// Upscale `buf` by `factor` using nearest-neighbor replication.
///
/// The input is left untouched and the output has the same channel
/// layout.
///
/// # Errors
///
/// Same as [`plan_upscale`].
pub fn upscale_with_options(
    buf: &PixelBuffer,
    factor: u32,
    options: &UpscaleOptions,
) -> TransformResult<PixelBuffer> {
    let plan = plan_upscale(buf, factor, options)?;
    let len = usize::try_from(plan.byte_len).map_err(|_| TransformError::ResultTooLarge {
        required: plan.byte_len,
        limit: options.max_output_bytes,
    })?;

    debug!(
        src_width = buf.width(),
        src_height = buf.height(),
        dst_width = plan.width,
        dst_height = plan.height,
        factor = plan.factor.get(),
        bytes = plan.byte_len,
        "upscaling"
    );

    let factor = plan.factor.get() as usize;
    let bpp = buf.channel_count() as usize;
    let out_stride = buf.stride() * factor;

    let mut data = Vec::with_capacity(len);
    for row in buf.rows() {
        let start = data.len();
        for px in row.chunks_exact(bpp) {
            for _ in 0..factor {
                data.extend_from_slice(px);
            }
        }
        for _ in 1..factor {
            data.extend_from_within(start..start + out_stride);
        }
    }

    Ok(PixelBuffer::new(plan.width, plan.height, buf.channels(), data)?)
}
