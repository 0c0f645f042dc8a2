use rayon::prelude::*;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::buffer::{clamp_channel, PixelBuffer};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::look::LookProcessor;
use crate::image_pipeline::stacking::source::FrameSource;
use crate::image_pipeline::stacking::types::StackConfig;

/// Composites `frame` over `accumulator` at the given opacity, in place.
///
/// Each channel (alpha included) becomes `acc + (frame - acc) * opacity`, rounded
/// back to 8 bits. Both buffers must share dimensions, otherwise `InvalidBuffer`
/// is returned with the frame's geometry and the accumulator is left untouched.
pub fn blend_into(accumulator: &mut PixelBuffer, frame: &PixelBuffer, opacity: f32) -> Result<()> {
    if !accumulator.same_dimensions(frame) {
        return Err(PipelineError::InvalidBuffer {
            width: frame.width(),
            height: frame.height(),
            len: frame.data().len(),
        });
    }

    accumulator
        .data_mut()
        .par_iter_mut()
        .zip(frame.data().par_iter())
        .for_each(|(acc, &sample)| {
            let base = *acc as f32;
            *acc = clamp_channel(base + (sample as f32 - base) * opacity);
        });
    Ok(())
}

/// Merges several samples of a frame source into one low-noise frame.
///
/// Sample `i` (counting from 1) is composited over the running result with
/// opacity `1/i`. The accumulator is quantised to 8 bits after every step, so
/// the outcome is a recency-weighted blend rather than the exact mean of the
/// samples.
pub struct FrameStacker {
    config: StackConfig,
    look: LookProcessor,
}

impl FrameStacker {
    pub fn new(config: StackConfig, look: LookProcessor) -> Self {
        Self { config, look }
    }

    /// Samples `frame_count` frames, merges them and applies the look once.
    pub async fn stack<S>(&self, source: &mut S, frame_count: u32) -> Result<PixelBuffer>
    where
        S: FrameSource + ?Sized,
    {
        let composite = self.accumulate(source, frame_count).await?;
        let _span = tracing::info_span!("apply_look").entered();
        self.look.apply_owned(composite)
    }

    /// Samples and merges `frame_count` frames without applying the look.
    #[instrument(skip(self, source))]
    pub async fn accumulate<S>(&self, source: &mut S, frame_count: u32) -> Result<PixelBuffer>
    where
        S: FrameSource + ?Sized,
    {
        if frame_count == 0 {
            return Err(PipelineError::InvalidFrameCount(frame_count));
        }

        info!(
            frame_count,
            interval_ms = self.config.frame_interval.as_millis() as u64,
            "Starting frame stacking"
        );

        let mut accumulator: Option<PixelBuffer> = None;

        for index in 1..=frame_count {
            let frame = source.sample().inspect_err(|e| {
                warn!(frame = index, error = %e, "Frame source failed, aborting stack");
            })?;
            self.validate_frame(&frame, accumulator.as_ref())?;

            accumulator = Some(match accumulator {
                None => frame,
                Some(mut acc) => {
                    blend_into(&mut acc, &frame, 1.0 / index as f32)?;
                    acc
                }
            });
            debug!(frame = index, total = frame_count, "Frame merged");

            if index < frame_count && !self.config.frame_interval.is_zero() {
                sleep(self.config.frame_interval).await;
            }
        }

        accumulator.ok_or(PipelineError::InvalidFrameCount(frame_count))
    }

    /// Samples must all share the first sample's size. `validate_dimensions`
    /// only controls the `max_dimension` limit.
    fn validate_frame(&self, frame: &PixelBuffer, reference: Option<&PixelBuffer>) -> Result<()> {
        let (width, height) = frame.dimensions();
        let invalid = || PipelineError::InvalidBuffer {
            width,
            height,
            len: frame.data().len(),
        };

        if let (true, Some(max)) = (self.config.validate_dimensions, self.config.max_dimension) {
            if width > max || height > max {
                warn!(width, height, max, "Frame exceeds maximum dimension");
                return Err(invalid());
            }
        }

        if let Some(reference) = reference {
            if !reference.same_dimensions(frame) {
                warn!(
                    expected_width = reference.width(),
                    expected_height = reference.height(),
                    width,
                    height,
                    "Frame size changed mid-stack"
                );
                return Err(invalid());
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    pub fn look(&self) -> &LookProcessor {
        &self.look
    }
}
