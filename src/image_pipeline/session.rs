//! Capture session module
//!
//! This module owns the per-session capture state machine, runs the standard or
//! stacked path for each capture, and keeps the resulting artifacts in memory.

pub mod config;
mod manager;
pub mod types;


pub use config::{SessionConfig, SessionConfigBuilder};
pub use manager::CaptureSession;
pub use types::{
    ArtifactMetadata, CaptureMode, CaptureOutcome, CaptureSettings, CaptureState,
    CapturedArtifact, SettingsMetadata, WhiteBalance,
};
