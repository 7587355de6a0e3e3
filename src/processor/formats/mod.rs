pub mod jpeg;
pub mod png;
pub mod webp;

use image::RgbImage;

use super::error::ProcessorError;
use super::types::OutputFormat;

/// Encode a normalized RGB buffer into the requested format. `quality` is
/// ignored by lossless formats; `None` leaves the encoder at its default.
pub fn encode(
    image: &RgbImage,
    format: OutputFormat,
    quality: Option<u8>,
) -> Result<Vec<u8>, ProcessorError> {
    match format {
        OutputFormat::Jpeg => jpeg::encode(image, quality.unwrap_or(jpeg::DEFAULT_QUALITY)),
        OutputFormat::WebP => webp::encode(image, quality.unwrap_or(webp::DEFAULT_QUALITY)),
        OutputFormat::Png => png::encode(image),
    }
}
