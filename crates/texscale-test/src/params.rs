//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use std::fs;
use texscale_core::PixelBuffer;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Run every check in memory (default)
    #[default]
    Compare,
    /// Also write each checked image to the regout directory
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of a regression test: its name, the index of the
/// current check, the mode, and every failure seen so far. Checks never
/// panic; call [`RegParams::cleanup`] at the end and assert on it.
pub struct RegParams {
    /// Name of the test (e.g., "upscale")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "upscale")
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        if mode == RegTestMode::Display {
            let _ = fs::create_dir_all(regout_dir());
        }

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Record a boolean condition
    ///
    /// # Arguments
    ///
    /// * `ok` - The condition that must hold
    /// * `what` - Short description used in the failure message
    pub fn check(&mut self, ok: bool, what: &str) -> bool {
        self.index += 1;
        if !ok {
            self.fail(format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            ));
        }
        ok
    }

    /// Compare two buffers for exact equality
    ///
    /// Dimensions and channel layout must match, then every byte.
    /// The first differing pixel is reported.
    pub fn compare_buffers(&mut self, expected: &PixelBuffer, actual: &PixelBuffer) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() || expected.channels() != actual.channels()
        {
            self.fail(format!(
                "Failure in {}_reg: buffer comparison for index {} - layout mismatch: \
                 {:?} {:?} vs {:?} {:?}",
                self.test_name,
                self.index,
                expected.dimensions(),
                expected.channels(),
                actual.dimensions(),
                actual.channels()
            ));
            return false;
        }

        let width = expected.width() as usize;
        let mismatch = expected
            .pixels()
            .zip(actual.pixels())
            .position(|(a, b)| a != b);

        if let Some(i) = mismatch {
            self.fail(format!(
                "Failure in {}_reg: buffer comparison for index {} - pixel mismatch at ({}, {})",
                self.test_name,
                self.index,
                i % width,
                i / width
            ));
            return false;
        }

        true
    }

    /// Compare two byte arrays
    ///
    /// # Returns
    ///
    /// `true` if data is identical, `false` otherwise.
    pub fn compare_bytes(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            self.fail(format!(
                "Failure in {}_reg: byte comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            ));
            false
        } else {
            true
        }
    }

    /// Encode a buffer as PNG and check it decodes back unchanged
    ///
    /// In display mode the PNG is also written to
    /// `tests/regout/<name>.<index>.png` for inspection.
    pub fn write_buffer_and_check(&mut self, buf: &PixelBuffer) -> TestResult<()> {
        self.index += 1;

        let encoded = texscale_io::encode_png(buf).map_err(|e| TestError::ImageWrite {
            path: format!("<memory {}>", self.index),
            message: e.to_string(),
        })?;

        if self.display() {
            let local_path = format!(
                "{}/{}.{:02}.png",
                regout_dir(),
                self.test_name,
                self.index
            );
            fs::write(&local_path, &encoded)?;
            eprintln!("Wrote: {}", local_path);
        }

        match texscale_io::decode(&encoded) {
            Ok(decoded) if &decoded == buf => {}
            Ok(_) => self.fail(format!(
                "Failure in {}_reg, index {}: PNG round trip changed the image",
                self.test_name, self.index
            )),
            Err(e) => self.fail(format!(
                "Failure in {}_reg, index {}: PNG round trip failed: {}",
                self.test_name, self.index, e
            )),
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texscale_core::Channels;

    #[test]
    fn test_mode_from_env() {
        // Can't safely change env vars here; just check a valid mode comes back
        let mode = RegTestMode::from_env();
        assert!(matches!(mode, RegTestMode::Compare | RegTestMode::Display));
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_buffers_reports_pixel() {
        let a = PixelBuffer::filled(3, 2, Channels::Rgb, &[0, 0, 0]).unwrap();
        let b = PixelBuffer::from_fn(3, 2, Channels::Rgb, |x, y, px| {
            if (x, y) == (2, 1) {
                px[0] = 1;
            }
        })
        .unwrap();

        let mut rp = RegParams::new("test");
        assert!(rp.compare_buffers(&a, &a.clone()));
        assert!(!rp.compare_buffers(&a, &b));
        assert!(rp.failures()[0].contains("(2, 1)"));
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_buffers_layout_mismatch() {
        let a = PixelBuffer::filled(1, 1, Channels::Rgb, &[0, 0, 0]).unwrap();
        let b = PixelBuffer::filled(1, 1, Channels::Rgba, &[0, 0, 0, 255]).unwrap();
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_buffers(&a, &b));
    }
}
