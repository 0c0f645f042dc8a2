//! JPEG artifact encoder backed by the `image` crate.

use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use tracing::debug;

use crate::image_pipeline::buffer::{PixelBuffer, CHANNELS};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::encoding::encoder::ArtifactEncoder;
use crate::image_pipeline::encoding::types::{EncodingFormat, DEFAULT_JPEG_QUALITY};

/// Encodes artifacts as baseline JPEG at a fixed quality.
///
/// JPEG has no alpha channel, so alpha is dropped before encoding.
#[derive(Debug, Clone, Copy)]
pub struct JpegArtifactEncoder {
    quality: u8,
}

impl Default for JpegArtifactEncoder {
    fn default() -> Self {
        Self::with_quality(DEFAULT_JPEG_QUALITY)
    }
}

impl JpegArtifactEncoder {
    /// Quality is clamped to `1..=100`.
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl ArtifactEncoder for JpegArtifactEncoder {
    fn encode(&self, image: &PixelBuffer, output: &mut dyn Write) -> Result<()> {
        debug!(
            width = image.width(),
            height = image.height(),
            quality = self.quality,
            "Encoding JPEG image"
        );

        let rgb: Vec<u8> = image
            .data()
            .chunks_exact(CHANNELS)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        let mut encoder = JpegEncoder::new_with_quality(output, self.quality);
        encoder
            .encode(&rgb, image.width(), image.height(), ExtendedColorType::Rgb8)
            .map_err(|e| PipelineError::EncodingFailure(format!("JPEG encoding failed: {}", e)))?;

        debug!("JPEG encoding complete");
        Ok(())
    }

    fn format(&self) -> EncodingFormat {
        EncodingFormat::Jpeg
    }
}
