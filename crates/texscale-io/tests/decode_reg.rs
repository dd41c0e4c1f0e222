//! Decode regression test
//!
//! Encodes the generated fixtures in every supported input format and
//! checks that decoding restores the geometry, the channel layout and,
//! for lossless formats, the exact pixels.
//!
//! Run with:
//! ```
//! cargo test -p texscale-io --test decode_reg
//! ```

use texscale_core::Channels;
use texscale_io::{DecodeError, ImageFormat, decode, decode_file, detect_format};
use texscale_test::{RegParams, fixtures, scratch_path};

#[test]
fn decode_reg() {
    let mut rp = RegParams::new("decode");

    let rgb = fixtures::grass_block();
    let rgba = fixtures::gradient_rgba(9, 6);

    // --- Test 1: lossless formats restore pixels exactly ---
    let lossless = [
        ("PNG", ImageFormat::Png, fixtures::png_bytes(&rgb).unwrap(), &rgb),
        ("PNG", ImageFormat::Png, fixtures::png_bytes(&rgba).unwrap(), &rgba),
        ("BMP", ImageFormat::Bmp, fixtures::bmp_bytes(&rgb).unwrap(), &rgb),
        ("BMP", ImageFormat::Bmp, fixtures::bmp_bytes(&rgba).unwrap(), &rgba),
        ("WebP", ImageFormat::WebP, fixtures::webp_bytes(&rgb).unwrap(), &rgb),
        ("WebP", ImageFormat::WebP, fixtures::webp_bytes(&rgba).unwrap(), &rgba),
        ("GIF", ImageFormat::Gif, fixtures::gif_bytes(&rgb).unwrap(), &rgb),
    ];
    for (name, format, bytes, expected) in &lossless {
        rp.check(detect_format(bytes).ok() == Some(*format), name);
        match decode(bytes) {
            Ok(buf) => {
                rp.compare_buffers(expected, &buf);
            }
            Err(e) => {
                rp.check(false, &format!("{} decode failed: {}", name, e));
            }
        }
        eprintln!("  {}: {} bytes", name, bytes.len());
    }

    // --- Test 2: GIF transparency becomes RGBA ---
    let cutout = fixtures::checkerboard(4, 4, 2, &[255, 0, 0, 255], &[0, 0, 0, 0]);
    let buf = decode(&fixtures::gif_bytes(&cutout).unwrap()).expect("decode GIF cutout");
    rp.compare_buffers(&cutout, &buf);

    // --- Test 3: JPEG is lossy; check layout and approximate color ---
    let flat = fixtures::checkerboard(16, 8, 8, &[200, 40, 40], &[200, 40, 40]);
    let jpeg = fixtures::jpeg_bytes(&flat, 95).unwrap();
    rp.check(detect_format(&jpeg).ok() == Some(ImageFormat::Jpeg), "JPEG magic");
    let buf = decode(&jpeg).expect("decode JPEG");
    rp.compare_values(16.0, buf.width() as f64, 0.0);
    rp.compare_values(8.0, buf.height() as f64, 0.0);
    rp.check(buf.channels() == Channels::Rgb, "JPEG decodes to RGB");
    let center = buf.pixel(4, 4).unwrap();
    rp.compare_values(200.0, center[0] as f64, 8.0);
    rp.compare_values(40.0, center[1] as f64, 8.0);
    rp.compare_values(40.0, center[2] as f64, 8.0);

    // --- Test 4: errors ---
    rp.check(
        matches!(decode(b"not an image at all"), Err(DecodeError::UnsupportedFormat(_))),
        "unknown magic",
    );
    let mut truncated = fixtures::png_bytes(&rgb).unwrap();
    truncated.truncate(40);
    rp.check(
        matches!(decode(&truncated), Err(DecodeError::CorruptData(_))),
        "truncated PNG",
    );
    let mut truncated = fixtures::bmp_bytes(&rgb).unwrap();
    truncated.truncate(100);
    rp.check(
        matches!(decode(&truncated), Err(DecodeError::CorruptData(_))),
        "truncated BMP",
    );
    rp.check(
        matches!(
            decode_file(scratch_path("missing-input.png")),
            Err(DecodeError::Io(_))
        ),
        "missing file",
    );

    // --- Test 5: decode from a file on disk ---
    let path = scratch_path("decode_reg.bmp");
    std::fs::write(&path, fixtures::bmp_bytes(&rgb).unwrap()).unwrap();
    let from_file = decode_file(&path).expect("decode BMP file");
    rp.compare_buffers(&rgb, &from_file);
    let _ = std::fs::remove_file(&path);

    assert!(rp.cleanup(), "decode regression test failed");
}

#[test]
fn decode_large_gif_reg() {
    let mut rp = RegParams::new("decode_large_gif");

    // RGBA frame output of this size exceeds the gif crate's default limit
    let board = fixtures::checkerboard(3700, 3700, 37, &fixtures::BLUE, &fixtures::WHITE);
    let bytes = fixtures::gif_bytes(&board).expect("encode large GIF");
    match decode(&bytes) {
        Ok(buf) => {
            rp.compare_buffers(&board, &buf);
        }
        Err(e) => {
            rp.check(false, &format!("large GIF decode failed: {}", e));
        }
    }

    assert!(rp.cleanup(), "decode_large_gif regression test failed");
}
