use image::{ExtendedColorType, ImageEncoder, RgbImage, codecs::jpeg::JpegEncoder};

use crate::processor::error::ProcessorError;
use crate::processor::types::OutputFormat;

pub const DEFAULT_QUALITY: u8 = 85;

/// Encode an RGB buffer as baseline JPEG at the given quality.
pub fn encode(image: &RgbImage, quality: u8) -> Result<Vec<u8>, ProcessorError> {
    let mut output = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut output, quality);
    encoder
        .write_image(
            image,
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ProcessorError::encode(OutputFormat::Jpeg, e))?;
    Ok(output)
}
