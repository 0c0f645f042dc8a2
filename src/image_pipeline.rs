//! Image capture pipeline module
//!
//! This module provides frame stacking and the camera look, with separate
//! modules for convolution, colour processing, encoding and session handling.

pub mod analysis;
pub mod buffer;
pub mod common;
pub mod convolution;
pub mod encoding;
pub mod look;
pub mod session;
pub mod stacking;

pub use common::{
    PipelineError,
    Result,
};

pub use buffer::PixelBuffer;

pub use convolution::{
    convolve,
    Kernel,
};

pub use look::{
    BlendMode,
    LookConfig,
    LookConfigBuilder,
    LookProcessor,
    TintLayer,
};

pub use stacking::{
    FrameSource,
    FrameStacker,
    StackConfig,
    SyntheticFrameSource,
};

pub use encoding::{
    ArtifactEncoder,
    EncodingFormat,
    JpegArtifactEncoder,
    TiffArtifactEncoder,
    TiffCompression,
};

pub use session::{
    CaptureMode,
    CaptureSession,
    CaptureSettings,
    CaptureState,
    CapturedArtifact,
    SessionConfig,
    SessionConfigBuilder,
    WhiteBalance,
};

pub use analysis::{
    describe_artifact,
    OfflineAnalyzer,
    SceneAnalyzer,
    ANALYSIS_UNAVAILABLE,
};
