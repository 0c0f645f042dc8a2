//! Deterministic stand-in camera.
//!
//! Produces a colour gradient scene with fresh uniform noise on every sample,
//! which is enough to watch stacking smooth the noise out without real hardware.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::image_pipeline::buffer::{PixelBuffer, CHANNELS};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::stacking::source::FrameSource;

/// Noisy synthetic frame source with a fixed seed.
pub struct SyntheticFrameSource {
    scene: PixelBuffer,
    noise_amplitude: i16,
    rng: StdRng,
    samples_taken: u32,
    disconnect_after: Option<u32>,
}

impl SyntheticFrameSource {
    /// Creates a `width`x`height` gradient scene with `noise_amplitude` of
    /// uniform per-channel noise.
    pub fn new(width: u32, height: u32, noise_amplitude: u8, seed: u64) -> Result<Self> {
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                let r = (x as u64 * 255 / width.max(1) as u64) as u8;
                let g = (y as u64 * 255 / height.max(1) as u64) as u8;
                let b = 255 - r / 2 - g / 2;
                data.extend_from_slice(&[r, g, b, 255]);
            }
        }

        Ok(Self {
            scene: PixelBuffer::new(width, height, data)?,
            noise_amplitude: noise_amplitude as i16,
            rng: StdRng::seed_from_u64(seed),
            samples_taken: 0,
            disconnect_after: None,
        })
    }

    /// Makes the source fail once `samples` frames have been handed out,
    /// like a camera being unplugged mid-burst.
    pub fn disconnect_after(mut self, samples: u32) -> Self {
        self.disconnect_after = Some(samples);
        self
    }

    pub fn samples_taken(&self) -> u32 {
        self.samples_taken
    }
}

impl FrameSource for SyntheticFrameSource {
    fn sample(&mut self) -> Result<PixelBuffer> {
        if self.disconnect_after.is_some_and(|limit| self.samples_taken >= limit) {
            warn!(samples = self.samples_taken, "Synthetic camera disconnected");
            return Err(PipelineError::FrameSourceUnavailable(format!(
                "synthetic camera disconnected after {} samples",
                self.samples_taken
            )));
        }

        let mut frame = self.scene.clone();
        if self.noise_amplitude > 0 {
            let amplitude = self.noise_amplitude;
            for pixel in frame.data_mut().chunks_exact_mut(CHANNELS) {
                for channel in pixel.iter_mut().take(3) {
                    let noise = self.rng.gen_range(-amplitude..=amplitude);
                    *channel = (*channel as i16 + noise).clamp(0, 255) as u8;
                }
            }
        }

        self.samples_taken += 1;
        debug!(sample = self.samples_taken, "Synthetic frame sampled");
        Ok(frame)
    }
}
