//! texscale-test - Regression test framework for texscale
//!
//! This crate provides the regression test harness shared by the
//! workspace's `*_reg` tests, supporting two modes:
//!
//! - **Compare**: Run every check in memory
//! - **Display**: Also write checked images to `tests/regout` for visual
//!   inspection
//!
//! Test images are generated by [`fixtures`] rather than loaded from disk.
//!
//! # Usage
//!
//! ```ignore
//! use texscale_test::{RegParams, fixtures};
//!
//! let mut rp = RegParams::new("upscale");
//! let out = texscale_transform::upscale(&fixtures::quadrants(), 2)?;
//! rp.compare_values(4.0, out.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
pub fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // texscale-test is at crates/texscale-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Get a unique scratch path under the system temp directory
///
/// Paths include the process id so parallel test binaries do not collide.
pub fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("texscale-{}-{}", std::process::id(), name))
}
