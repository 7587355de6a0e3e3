use image::RgbImage;

use crate::processor::error::ProcessorError;
use crate::processor::types::OutputFormat;

pub const DEFAULT_QUALITY: u8 = 85;

/// Encode an RGB buffer as lossy WebP. The `image` crate only writes
/// lossless WebP, so this goes through the `webp` crate.
pub fn encode(image: &RgbImage, quality: u8) -> Result<Vec<u8>, ProcessorError> {
    let (width, height) = image.dimensions();
    let encoder = webp::Encoder::from_rgb(image.as_raw(), width, height);
    let encoded = encoder
        .encode_simple(false, quality as f32)
        .map_err(|e| ProcessorError::encode(OutputFormat::WebP, format!("{:?}", e)))?;
    Ok(encoded.to_vec())
}
