//! Kernel convolution module
//!
//! This module provides square weight kernels and a 2D convolution engine over
//! RGBA pixel buffers.

mod engine;
pub mod kernel;

pub use engine::convolve;
pub use kernel::Kernel;
