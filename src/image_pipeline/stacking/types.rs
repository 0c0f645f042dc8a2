//! Frame stacking configuration types

use std::time::Duration;

/// Number of frames merged by an enhanced capture unless configured otherwise.
pub const DEFAULT_FRAME_COUNT: u32 = 4;

/// Pause between samples so sensor noise differs from frame to frame.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Configuration for the frame stacker
#[derive(Debug, Clone)]
pub struct StackConfig {
    /// Delay between consecutive samples (zero disables pacing)
    pub frame_interval: Duration,
    /// Whether to check sample dimensions before merging
    pub validate_dimensions: bool,
    /// Largest accepted width or height
    pub max_dimension: Option<u32>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            frame_interval: DEFAULT_FRAME_INTERVAL,
            validate_dimensions: true,
            max_dimension: Some(16384),
        }
    }
}
