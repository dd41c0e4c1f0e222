//! texscale - Integer upscaler for pixel-art textures
//!
//! Loads a raster image, enlarges it by an integer factor with
//! nearest-neighbor sampling so every source pixel becomes a crisp
//! square block, and saves the result as PNG.
//!
//! # Overview
//!
//! The work is split across three crates, re-exported here:
//!
//! - [`io`] - Decode PNG, JPEG, BMP, GIF and WebP; encode PNG
//! - [`transform`] - The upscaler and its size guard
//! - Core types ([`PixelBuffer`], [`Channels`], ...) at the crate root
//!
//! [`pipeline::upscale_file`] runs decode, upscale and encode in one call.
//!
//! # Example
//!
//! ```
//! use texscale::{Channels, PixelBuffer};
//!
//! let src = PixelBuffer::new(2, 1, Channels::Rgb, vec![255, 0, 0, 0, 0, 255]).unwrap();
//! let out = texscale::transform::upscale(&src, 4).unwrap();
//! assert_eq!(out.dimensions(), (8, 4));
//! ```

pub mod config;
pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use texscale_core::*;

// Re-export component crates as modules to avoid name conflicts
pub use texscale_io as io;
pub use texscale_transform as transform;

pub use config::PipelineConfig;
pub use pipeline::{PipelineError, UpscaleReport, upscale_file};
