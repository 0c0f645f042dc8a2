//! Frame stacking module
//!
//! This module samples a frame source repeatedly, merges the samples into one
//! composite and hands the composite to the look processor.

mod source;
mod stacker;
mod synthetic_source;
pub mod types;

pub use source::FrameSource;
pub use stacker::{blend_into, FrameStacker};
pub use synthetic_source::SyntheticFrameSource;
pub use types::{StackConfig, DEFAULT_FRAME_COUNT, DEFAULT_FRAME_INTERVAL};
