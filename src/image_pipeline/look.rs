//! Look processing module
//!
//! This module turns a merged frame into the stylised output: two tint layers
//! composited with blend modes, a contrast and saturation boost, and optional
//! sharpening.

pub mod blend;
mod processor;
pub mod types;

pub use blend::{overlay, soft_light, BlendMode};
pub use processor::LookProcessor;
pub use types::{LookConfig, LookConfigBuilder, TintLayer};
