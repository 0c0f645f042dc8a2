use std::io::{Cursor, Write};

use tiff::encoder::colortype::RGBA8;
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;

use crate::image_pipeline::buffer::PixelBuffer;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::encoding::encoder::ArtifactEncoder;
use crate::image_pipeline::encoding::types::{EncodingFormat, TiffCompression};

/// Lossless RGBA TIFF encoder.
#[derive(Debug, Clone, Copy)]
pub struct TiffArtifactEncoder {
    compression: TiffCompression,
    /// Horizontal differencing before compression
    predictor: bool,
}

impl Default for TiffArtifactEncoder {
    fn default() -> Self {
        Self::new(TiffCompression::DeflateBalanced, true)
    }
}

impl TiffArtifactEncoder {
    pub fn new(compression: TiffCompression, predictor: bool) -> Self {
        Self { compression, predictor }
    }

    pub fn compression(&self) -> TiffCompression {
        self.compression
    }
}

impl ArtifactEncoder for TiffArtifactEncoder {
    fn encode(&self, image: &PixelBuffer, output: &mut dyn Write) -> Result<()> {
        debug!(
            width = image.width(),
            height = image.height(),
            compression = ?self.compression,
            "Encoding TIFF image"
        );

        let mut buffer = Vec::new();

        let compression = match self.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| PipelineError::EncodingFailure(e.to_string()))?
            .with_compression(compression);

        if self.predictor {
            encoder = encoder.with_predictor(Predictor::Horizontal);
        }

        encoder
            .write_image::<RGBA8>(image.width(), image.height(), image.data())
            .map_err(|e| PipelineError::EncodingFailure(e.to_string()))?;

        output
            .write_all(&buffer)
            .map_err(|e| PipelineError::EncodingFailure(e.to_string()))?;

        debug!(size = buffer.len(), "TIFF encoding complete");
        Ok(())
    }

    fn format(&self) -> EncodingFormat {
        EncodingFormat::Tiff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiff::decoder::{Decoder, DecodingResult};

    fn checker(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let on = (x + y) % 2 == 0;
                data.extend_from_slice(&[if on { 250 } else { 5 }, x as u8, y as u8, 180]);
            }
        }
        PixelBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn test_lossless_with_alpha() {
        let image = checker(9, 7);
        for compression in [TiffCompression::None, TiffCompression::Lzw, TiffCompression::DeflateBest] {
            let mut output = Vec::new();
            TiffArtifactEncoder::new(compression, false)
                .encode(&image, &mut output)
                .unwrap();

            let mut decoder = Decoder::new(Cursor::new(output)).unwrap();
            assert_eq!(decoder.dimensions().unwrap(), (9, 7));
            match decoder.read_image().unwrap() {
                DecodingResult::U8(data) => assert_eq!(data, image.data(), "{compression:?}"),
                _ => panic!("expected 8-bit samples"),
            }
        }
    }
}
