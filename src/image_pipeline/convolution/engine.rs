use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::image_pipeline::buffer::{clamp_channel, PixelBuffer, CHANNELS};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::convolution::kernel::Kernel;

/// Convolves the colour channels of `buffer` with `kernel`.
///
/// Each destination pixel is the weighted sum of the kernel footprint centred on
/// it, computed per channel for red, green and blue. Alpha is copied from the
/// source pixel. Taps that fall outside the image contribute nothing, so kernels
/// with positive off-centre weights darken the border. Sums are rounded and
/// clamped to `[0, 255]`.
///
/// The input is left untouched; rows of the output are filled in parallel.
#[instrument(skip_all, fields(width = buffer.width(), height = buffer.height(), side = kernel.side()))]
pub fn convolve(buffer: &PixelBuffer, kernel: &Kernel) -> Result<PixelBuffer> {
    let (width, height) = buffer.dimensions();
    let (w, h) = (width as i64, height as i64);
    let radius = kernel.radius() as i64;
    let stride = buffer.row_stride();
    let src = buffer.data();

    let mut out = vec![0u8; src.len()];

    out.par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as i64;
            for x in 0..w {
                let mut sum = [0.0f32; 3];

                for ky in -radius..=radius {
                    let sy = y + ky;
                    if sy < 0 || sy >= h {
                        continue;
                    }
                    for kx in -radius..=radius {
                        let sx = x + kx;
                        if sx < 0 || sx >= w {
                            continue;
                        }
                        let weight = kernel.weight((kx + radius) as usize, (ky + radius) as usize);
                        let idx = sy as usize * stride + sx as usize * CHANNELS;
                        for (c, acc) in sum.iter_mut().enumerate() {
                            *acc += weight * src[idx + c] as f32;
                        }
                    }
                }

                let dst = x as usize * CHANNELS;
                for (c, value) in sum.iter().enumerate() {
                    row[dst + c] = clamp_channel(*value);
                }
                row[dst + 3] = src[y as usize * stride + dst + 3];
            }
        });

    debug!("Convolution complete");
    PixelBuffer::new(width, height, out)
}
