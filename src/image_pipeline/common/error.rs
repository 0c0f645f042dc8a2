use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid kernel: side={side}, weights={weights} (side must be odd and >= 1, weights must equal side^2)")]
    InvalidKernel { side: usize, weights: usize },

    #[error("Invalid pixel buffer: width={width}, height={height}, data length={len}")]
    InvalidBuffer { width: u32, height: u32, len: usize },

    #[error("Invalid frame count: {0} (at least one frame is required)")]
    InvalidFrameCount(u32),

    #[error("Frame source unavailable: {0}")]
    FrameSourceUnavailable(String),

    #[error("A capture is already in progress")]
    CaptureInProgress,

    #[error("Failed to encode artifact: {0}")]
    EncodingFailure(String),
}

impl PipelineError {
    /// Short stable name of the failure kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidKernel { .. } => "invalid_kernel",
            PipelineError::InvalidBuffer { .. } => "invalid_buffer",
            PipelineError::InvalidFrameCount(_) => "invalid_frame_count",
            PipelineError::FrameSourceUnavailable(_) => "frame_source_unavailable",
            PipelineError::CaptureInProgress => "capture_in_progress",
            PipelineError::EncodingFailure(_) => "encoding_failure",
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
