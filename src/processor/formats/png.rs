use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbImage};

use crate::processor::error::ProcessorError;
use crate::processor::types::OutputFormat;

/// Encode an RGB buffer as lossless PNG with best compression.
pub fn encode(image: &RgbImage) -> Result<Vec<u8>, ProcessorError> {
    let mut output = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut output, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(
            image,
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ProcessorError::encode(OutputFormat::Png, e))?;
    Ok(output)
}
