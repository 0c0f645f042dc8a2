//! Artifact encoding module
//!
//! This module turns the final pixel buffer into an interchange format: lossy
//! JPEG by default, or lossless TIFF with a choice of compression.

mod encoder;
mod jpeg_encoder;
mod tiff_encoder;
pub mod types;

pub use encoder::ArtifactEncoder;
pub use jpeg_encoder::JpegArtifactEncoder;
pub use tiff_encoder::TiffArtifactEncoder;
pub use types::{EncodingFormat, TiffCompression, DEFAULT_JPEG_QUALITY};
