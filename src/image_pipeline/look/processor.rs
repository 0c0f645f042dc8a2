use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::image_pipeline::buffer::{clamp_channel, PixelBuffer, CHANNELS};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::convolution::convolve;
use crate::image_pipeline::look::types::{LookConfig, TintLayer};

/// Rec.601 luma weights used as the saturation pivot.
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Mid-gray pivot for the contrast adjustment.
const CONTRAST_PIVOT: f32 = 128.0;

/// Applies the camera look to frames.
///
/// Stages run in a fixed order: shadow tint, highlight warmth, contrast and
/// saturation, then the optional sharpening kernel. Every stage clamps its output
/// to the 8-bit range and none of them touch alpha.
///
/// The processor holds no state between calls, so the same input always yields
/// the same output. Running a frame through it twice intensifies the look.
pub struct LookProcessor {
    config: LookConfig,
}

impl Default for LookProcessor {
    fn default() -> Self {
        Self::new(LookConfig::default())
    }
}

impl LookProcessor {
    pub fn new(config: LookConfig) -> Self {
        Self { config }
    }

    /// Returns a styled copy of `buffer`; the caller's buffer is left untouched.
    pub fn apply(&self, buffer: &PixelBuffer) -> Result<PixelBuffer> {
        self.apply_owned(buffer.clone())
    }

    /// Styles a buffer the caller hands over, reusing its allocation for the
    /// colour stages.
    #[instrument(skip_all, fields(width = buffer.width(), height = buffer.height()))]
    pub fn apply_owned(&self, mut buffer: PixelBuffer) -> Result<PixelBuffer> {
        {
            let _span = tracing::debug_span!("shadow_tint").entered();
            Self::composite_layer(&mut buffer, &self.config.shadow_tint);
        }

        {
            let _span = tracing::debug_span!("highlight_warmth").entered();
            Self::composite_layer(&mut buffer, &self.config.highlight_warmth);
        }

        {
            let _span = tracing::debug_span!("contrast_saturation",
                contrast = self.config.contrast,
                saturation = self.config.saturation
            ).entered();
            self.adjust_contrast_saturation(&mut buffer);
        }

        if let Some(kernel) = &self.config.sharpening {
            let _span = tracing::debug_span!("sharpen").entered();
            buffer = convolve(&buffer, kernel)?;
        }

        debug!("Look applied");
        Ok(buffer)
    }

    pub fn config(&self) -> &LookConfig {
        &self.config
    }

    fn composite_layer(buffer: &mut PixelBuffer, layer: &TintLayer) {
        buffer
            .data_mut()
            .par_chunks_exact_mut(CHANNELS)
            .for_each(|pixel| layer.composite(pixel));
    }

    fn adjust_contrast_saturation(&self, buffer: &mut PixelBuffer) {
        let contrast = self.config.contrast;
        let saturation = self.config.saturation;

        buffer
            .data_mut()
            .par_chunks_exact_mut(CHANNELS)
            .for_each(|pixel| {
                let mut rgb = [0.0f32; 3];
                for (value, &channel) in rgb.iter_mut().zip(pixel.iter()) {
                    *value = ((channel as f32 - CONTRAST_PIVOT) * contrast + CONTRAST_PIVOT)
                        .clamp(0.0, 255.0);
                }

                let luma: f32 = rgb
                    .iter()
                    .zip(LUMA_WEIGHTS.iter())
                    .map(|(v, w)| v * w)
                    .sum();

                for (channel, value) in pixel.iter_mut().zip(rgb.iter()) {
                    *channel = clamp_channel(luma + (value - luma) * saturation);
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::convolution::Kernel;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 40) as u8, (y * 60) as u8, 90, 255]);
            }
        }
        PixelBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn test_uniform_input_stays_uniform() {
        let processor = LookProcessor::default();
        for color in [[0, 0, 0, 255], [128, 128, 128, 255], [255, 255, 255, 255], [250, 10, 120, 200]] {
            let input = PixelBuffer::filled(8, 6, color).unwrap();
            let output = processor.apply(&input).unwrap();

            let first = output.pixel(0, 0).unwrap();
            assert!(output.pixels().all(|p| p == first), "uniform {color:?}");
            assert_eq!(first[3], color[3]);
        }
    }

    #[test]
    fn test_neutral_gray_is_warmed() {
        let input = PixelBuffer::filled(2, 2, [128, 128, 128, 255]).unwrap();
        let output = LookProcessor::default().apply(&input).unwrap();
        let [r, g, b, a] = output.pixel(0, 0).unwrap();

        assert!(r > g && g > b, "expected warm cast, got {r},{g},{b}");
        assert_eq!(a, 255);
    }

    #[test]
    fn test_reapplying_intensifies() {
        let processor = LookProcessor::default();
        let input = PixelBuffer::filled(2, 2, [128, 128, 128, 255]).unwrap();
        let once = processor.apply(&input).unwrap();
        let twice = processor.apply(&once).unwrap();
        assert_ne!(once, twice);
    }

    #[test]
    fn test_input_buffer_is_untouched() {
        let input = gradient(5, 4);
        let snapshot = input.clone();
        let _ = LookProcessor::default().apply(&input).unwrap();
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_neutral_config_is_identity() {
        let neutral = TintLayer {
            opacity: 0.0,
            ..TintLayer::SHADOW_TINT
        };
        let config = LookConfig::builder()
            .shadow_tint(neutral)
            .highlight_warmth(neutral)
            .contrast(1.0)
            .saturation(1.0)
            .build();

        let input = gradient(5, 4);
        let output = LookProcessor::new(config).apply(&input).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_sharpening_runs_last() {
        let input = gradient(6, 5);
        let plain = LookProcessor::default().apply(&input).unwrap();
        let sharpened = LookProcessor::new(
            LookConfig::builder().sharpening(Some(Kernel::sharpen())).build(),
        )
        .apply(&input)
        .unwrap();

        let expected = convolve(&plain, &Kernel::sharpen()).unwrap();
        assert_eq!(sharpened, expected);
    }
}
