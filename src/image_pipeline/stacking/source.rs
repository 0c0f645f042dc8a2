use crate::image_pipeline::buffer::PixelBuffer;
use crate::image_pipeline::common::error::Result;

/// Anything that can hand out the current frame on demand, such as a live camera stream.
///
/// Implementations return `FrameSourceUnavailable` when no frame can be produced.
pub trait FrameSource {
    fn sample(&mut self) -> Result<PixelBuffer>;
}

impl<F> FrameSource for F
where
    F: FnMut() -> Result<PixelBuffer>,
{
    fn sample(&mut self) -> Result<PixelBuffer> {
        self()
    }
}
