//! Pixel buffer types

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Number of interleaved channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Rounds a channel value computed in floating point and clamps it to `[0, 255]`.
#[inline]
pub fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// A rectangular RGBA8 image owned by whichever pipeline stage holds it.
///
/// The data length always equals `width * height * 4` and both dimensions are
/// at least 1. The only way to obtain a buffer is through a validating
/// constructor, so stages can rely on the invariant without rechecking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps interleaved RGBA data, failing with `InvalidBuffer` when the
    /// dimensions are zero or the length does not match them.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != Self::expected_len(width, height) {
            return Err(PipelineError::InvalidBuffer {
                width,
                height,
                len: data.len(),
            });
        }

        Ok(Self { width, height, data })
    }

    /// Builds a buffer where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let pixels = (width as usize) * (height as usize);
        let data = rgba.iter().copied().cycle().take(pixels * CHANNELS).collect();
        Self::new(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the RGBA value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * CHANNELS;
        let px = &self.data[idx..idx + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Iterates over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(CHANNELS)
    }

    /// True when both buffers have the same width and height.
    pub fn same_dimensions(&self, other: &PixelBuffer) -> bool {
        self.dimensions() == other.dimensions()
    }

    pub(crate) fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    fn expected_len(width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * CHANNELS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_mismatched_length() {
        let result = PixelBuffer::new(2, 2, vec![0u8; 15]);
        assert!(matches!(
            result,
            Err(PipelineError::InvalidBuffer { width: 2, height: 2, len: 15 })
        ));
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(PixelBuffer::new(0, 4, Vec::new()).is_err());
        assert!(PixelBuffer::new(4, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_clamp_channel_rounds_and_saturates() {
        assert_eq!(clamp_channel(-12.0), 0);
        assert_eq!(clamp_channel(127.5), 128);
        assert_eq!(clamp_channel(300.0), 255);
    }

    #[test]
    fn test_filled_and_pixel_access() {
        let buffer = PixelBuffer::filled(3, 2, [10, 20, 30, 255]).unwrap();
        assert_eq!(buffer.data().len(), 3 * 2 * 4);
        assert_eq!(buffer.pixel(2, 1), Some([10, 20, 30, 255]));
        assert_eq!(buffer.pixel(3, 0), None);
        assert!(buffer.pixels().all(|p| p == [10, 20, 30, 255]));
    }
}
