//! texscale-io - Image decoding and PNG encoding
//!
//! Decoding accepts PNG, JPEG, BMP, GIF and WebP. The container is
//! detected from magic bytes, never from the file name, and every image
//! is normalized to an RGB or RGBA [`PixelBuffer`].
//!
//! Encoding always produces PNG, which round-trips any `PixelBuffer`
//! exactly.
//!
//! # Example
//!
//! ```
//! use texscale_core::{Channels, PixelBuffer};
//!
//! let buf = PixelBuffer::filled(2, 2, Channels::Rgba, &[10, 20, 30, 40]).unwrap();
//! let png = texscale_io::encode_png(&buf).unwrap();
//! assert_eq!(texscale_io::decode(&png).unwrap(), buf);
//! ```

#[cfg(feature = "bmp")]
pub mod bmp;
mod error;
pub mod format;
#[cfg(feature = "gif-format")]
pub mod gif;
#[cfg(feature = "jpeg")]
pub mod jpeg;
pub mod png;
#[cfg(feature = "webp-format")]
pub mod webp;

pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use format::detect_format;
pub use texscale_core::ImageFormat;

use std::ffi::OsString;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use texscale_core::PixelBuffer;
use tracing::debug;

/// Decode an image held in memory.
///
/// # Errors
///
/// - [`DecodeError::UnsupportedFormat`] for unrecognized or disabled formats
/// - [`DecodeError::CorruptData`] if the codec rejects the data
pub fn decode(data: &[u8]) -> DecodeResult<PixelBuffer> {
    let format = detect_format(data)?;
    debug!(?format, bytes = data.len(), "decoding image");

    let buf = match format {
        ImageFormat::Png => png::read_png(Cursor::new(data))?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(data)?,
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(data)?,
        #[cfg(feature = "gif-format")]
        ImageFormat::Gif => gif::read_gif(data)?,
        #[cfg(feature = "webp-format")]
        ImageFormat::WebP => webp::read_webp(Cursor::new(data))?,
        #[allow(unreachable_patterns)]
        other => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )));
        }
    };

    debug!(
        width = buf.width(),
        height = buf.height(),
        channels = buf.channel_count(),
        "decoded image"
    );
    Ok(buf)
}

/// Decode an image from a file path.
///
/// The whole file is read before decoding starts.
///
/// # Errors
///
/// [`DecodeError::Io`] if the file cannot be read, otherwise as
/// [`decode`].
pub fn decode_file<P: AsRef<Path>>(path: P) -> DecodeResult<PixelBuffer> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading image file");
    let data = fs::read(path)?;
    decode(&data)
}

/// Decode an image from any reader.
pub fn decode_reader<R: Read>(mut reader: R) -> DecodeResult<PixelBuffer> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode(&data)
}

/// Encode a buffer as PNG in memory.
pub fn encode_png(buf: &PixelBuffer) -> EncodeResult<Vec<u8>> {
    let mut out = Vec::new();
    png::write_png(buf, &mut out)?;
    Ok(out)
}

/// Encode a buffer as PNG into a writer.
pub fn write_png<W: Write>(buf: &PixelBuffer, writer: W) -> EncodeResult<()> {
    png::write_png(buf, writer)
}

/// Encode a buffer as PNG into a file, creating or replacing it.
///
/// The image is encoded in memory, written to a hidden temporary file
/// next to `path` and renamed over it. On error the temporary file is
/// removed and whatever was at `path` is left as it was.
///
/// The path is used as given; see [`png_output_path`] to add the
/// extension.
pub fn write_png_file<P: AsRef<Path>>(buf: &PixelBuffer, path: P) -> EncodeResult<()> {
    let path = path.as_ref();
    debug!(
        path = %path.display(),
        width = buf.width(),
        height = buf.height(),
        "writing PNG"
    );
    let encoded = encode_png(buf)?;

    let tmp = temp_path(path);
    let result = fs::write(&tmp, &encoded).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    Ok(result?)
}

/// `dir/.name.<pid>.tmp` for `dir/name`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Append `.png` unless the path already ends with it (any case).
pub fn png_output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let has_png_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if has_png_ext {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".png");
        PathBuf::from(name)
    }
}
