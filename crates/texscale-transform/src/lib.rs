//! texscale-transform - Integer upscaling for pixel-art textures
//!
//! This crate enlarges a [`PixelBuffer`](texscale_core::PixelBuffer) by
//! an integer factor with nearest-neighbor sampling: every source pixel
//! becomes a `factor x factor` block of identical pixels, so hard edges
//! stay hard and no new colors appear.
//!
//! - [`upscale`] / [`upscale_with_options`] - Produce the enlarged buffer
//! - [`plan_upscale`] - Compute the output size without allocating
//! - [`ScaleFactor`] - Validated factor in `2..=64`

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{
    DEFAULT_MAX_OUTPUT_BYTES, ScaleFactor, UpscaleOptions, UpscalePlan, plan_upscale,
    plan_upscale_dimensions, upscale, upscale_with_options,
};
