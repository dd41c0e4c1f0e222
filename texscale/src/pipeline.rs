//! Decode, upscale, encode
//!
//! [`upscale_file`] is the whole program as a library call. Nothing is
//! written unless decoding and upscaling both succeed.

use crate::config::PipelineConfig;
use std::path::{Path, PathBuf};
use texscale_io::{DecodeError, EncodeError};
use texscale_transform::TransformError;
use thiserror::Error;
use tracing::info;

/// Failure of one pipeline stage
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input could not be read or decoded
    #[error("failed to decode input: {0}")]
    Decode(#[from] DecodeError),

    /// The upscaler rejected the factor or the output size
    #[error("failed to upscale: {0}")]
    Transform(#[from] TransformError),

    /// The output could not be encoded or written
    #[error("failed to write output: {0}")]
    Encode(#[from] EncodeError),
}

/// Outcome of a successful [`upscale_file`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpscaleReport {
    /// Source width and height
    pub source: (u32, u32),
    /// Output width and height
    pub output: (u32, u32),
    /// Channel count shared by source and output
    pub channels: u32,
    /// Where the PNG was written, `.png` appended if it was missing
    pub path: PathBuf,
}

/// Decode `input`, upscale it by `config.factor` and write a PNG.
///
/// # Errors
///
/// The first failing stage, wrapped in [`PipelineError`].
pub fn upscale_file<P, Q>(
    input: P,
    output: Q,
    config: &PipelineConfig,
) -> Result<UpscaleReport, PipelineError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let src = texscale_io::decode_file(input.as_ref())?;
    let out =
        texscale_transform::upscale_with_options(&src, config.factor, &config.upscale_options())?;

    let path = texscale_io::png_output_path(output);
    texscale_io::write_png_file(&out, &path)?;

    info!(
        "{}x{} -> {}x{} ({}x), saved to {}",
        src.width(),
        src.height(),
        out.width(),
        out.height(),
        config.factor,
        path.display()
    );

    Ok(UpscaleReport {
        source: src.dimensions(),
        output: out.dimensions(),
        channels: out.channel_count(),
        path,
    })
}
