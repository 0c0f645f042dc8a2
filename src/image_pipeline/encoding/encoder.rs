use std::io::Write;

use crate::image_pipeline::buffer::PixelBuffer;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::encoding::types::EncodingFormat;

pub trait ArtifactEncoder {
    fn encode(&self, image: &PixelBuffer, output: &mut dyn Write) -> Result<()>;
    fn format(&self) -> EncodingFormat;
}
