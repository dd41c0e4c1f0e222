//! Error types for the test harness

use thiserror::Error;

/// Errors that can occur while preparing or recording a regression test
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build an encoded fixture
    #[error("failed to encode {format} fixture: {message}")]
    FixtureEncode {
        format: &'static str,
        message: String,
    },

    /// Failed to write an image
    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
