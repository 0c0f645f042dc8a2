//! Capture session configuration types

use std::time::Duration;

use crate::image_pipeline::encoding::DEFAULT_JPEG_QUALITY;
use crate::image_pipeline::look::LookConfig;
use crate::image_pipeline::stacking::{StackConfig, DEFAULT_FRAME_COUNT, DEFAULT_FRAME_INTERVAL};

/// Configuration for a capture session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Frames merged by an enhanced capture
    pub frame_count: u32,
    /// Delay between samples of an enhanced capture
    pub frame_interval: Duration,
    /// Quality of the default JPEG encoder (1-100)
    pub jpeg_quality: u8,
    /// Whether to validate frame dimensions while stacking
    pub validate_dimensions: bool,
    /// Largest accepted frame width or height
    pub max_dimension: Option<u32>,
    /// Look applied to every capture
    pub look: LookConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAME_COUNT,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            validate_dimensions: true,
            max_dimension: Some(16384),
            look: LookConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    pub fn stack_config(&self) -> StackConfig {
        StackConfig {
            frame_interval: self.frame_interval,
            validate_dimensions: self.validate_dimensions,
            max_dimension: self.max_dimension,
        }
    }
}

/// Builder for SessionConfig
#[derive(Default)]
pub struct SessionConfigBuilder {
    frame_count: Option<u32>,
    frame_interval: Option<Duration>,
    jpeg_quality: Option<u8>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
    look: Option<LookConfig>,
}

impl SessionConfigBuilder {
    pub fn frame_count(mut self, count: u32) -> Self {
        self.frame_count = Some(count);
        self
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn look(mut self, look: LookConfig) -> Self {
        self.look = Some(look);
        self
    }

    pub fn build(self) -> SessionConfig {
        let default = SessionConfig::default();
        SessionConfig {
            frame_count: self.frame_count.unwrap_or(default.frame_count),
            frame_interval: self.frame_interval.unwrap_or(default.frame_interval),
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            look: self.look.unwrap_or(default.look),
        }
    }
}
