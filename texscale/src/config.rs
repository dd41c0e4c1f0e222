//! Pipeline configuration

use texscale_transform::{DEFAULT_MAX_OUTPUT_BYTES, UpscaleOptions};

/// Default scale factor
pub const DEFAULT_FACTOR: u32 = 4;

/// Settings for [`upscale_file`](crate::upscale_file)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Integer scale factor, validated by the upscaler
    pub factor: u32,
    /// Largest output buffer the upscaler may allocate
    pub max_output_bytes: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            factor: DEFAULT_FACTOR,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

impl PipelineConfig {
    /// Set the scale factor
    pub fn with_factor(mut self, factor: u32) -> Self {
        self.factor = factor;
        self
    }

    /// Set the output byte limit
    pub fn with_max_output_bytes(mut self, max_output_bytes: u64) -> Self {
        self.max_output_bytes = max_output_bytes;
        self
    }

    /// Upscaler options derived from this configuration
    pub fn upscale_options(&self) -> UpscaleOptions {
        UpscaleOptions::default().with_max_output_bytes(self.max_output_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.factor, 4);
        assert_eq!(config.max_output_bytes, DEFAULT_MAX_OUTPUT_BYTES);
        assert_eq!(config.upscale_options(), UpscaleOptions::default());
    }

    #[test]
    fn test_builders() {
        let config = PipelineConfig::default()
            .with_factor(16)
            .with_max_output_bytes(1024);
        assert_eq!(config.factor, 16);
        assert_eq!(config.upscale_options().max_output_bytes, 1024);
    }
}
