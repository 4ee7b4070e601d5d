use image::{DynamicImage, codecs::png::PngEncoder};
use std::io::Write;

use crate::gallery::GenerationError;

pub fn encode<W: Write>(image: &DynamicImage, writer: W) -> Result<(), GenerationError> {
    let encoder = PngEncoder::new(writer);
    image.write_with_encoder(encoder)?;
    Ok(())
}
