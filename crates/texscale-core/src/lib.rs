//! texscale-core - Pixel buffer for the texscale upscaler
//!
//! This crate provides the one data structure shared by every stage of
//! the pipeline:
//!
//! - [`PixelBuffer`] - An RGB or RGBA raster, row-major, one byte per sample
//! - [`Channels`] - The two channel layouts a buffer may have
//! - [`ImageFormat`] - Container formats known to the decoders
//!
//! Decoders normalize every source to RGB or RGBA with the helpers in
//! [`convert`] before building a buffer.

pub mod buffer;
pub mod error;

pub use buffer::{Channels, ImageFormat, PixelBuffer, Pixels, checked_byte_len, convert};
pub use error::{Error, Result};
