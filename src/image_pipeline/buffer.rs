//! Pixel buffer module
//!
//! This module provides the validated RGBA8 buffer that moves between pipeline stages.

pub mod types;

pub use types::{clamp_channel, PixelBuffer, CHANNELS};
