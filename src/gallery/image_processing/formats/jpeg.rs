use image::{DynamicImage, ImageEncoder, codecs::jpeg::JpegEncoder};
use std::io::Write;

use crate::gallery::GenerationError;

/// Encode as baseline JPEG. Alpha is dropped.
pub fn encode<W: Write>(
    image: &DynamicImage,
    writer: W,
    quality: u8,
) -> Result<(), GenerationError> {
    let rgb_image = image.to_rgb8();
    let encoder = JpegEncoder::new_with_quality(writer, quality);
    encoder.write_image(
        &rgb_image,
        rgb_image.width(),
        rgb_image.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}
