use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use rand::Rng;
use tracing::{debug, info};

use super::error::ProcessorError;
use super::formats;
use super::normalize::flatten_onto_white;
use super::resize::{clamp_dimensions, thumbnail};
use super::types::{OutputFormat, Rendition, VariantConfig};

/// Source formats accepted for decoding. Broader than the encode targets.
pub const SUPPORTED_SOURCE_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::WebP,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
];

/// Decode `raw_bytes` and produce every configured rendition plus the
/// trailing thumbnail, in declaration order.
///
/// All-or-nothing: a decode failure or any single encode failure fails the
/// whole call and no renditions are returned.
pub fn generate(
    raw_bytes: &[u8],
    source_key: &str,
    config: &VariantConfig,
) -> Result<Vec<Rendition>, ProcessorError> {
    let reader = ImageReader::new(Cursor::new(raw_bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;

    let declared_format = reader.format();
    if let Some(format) = declared_format
        && !SUPPORTED_SOURCE_FORMATS.contains(&format)
    {
        return Err(ProcessorError::UnsupportedFormat(format!("{:?}", format)));
    }

    let decoded = reader.decode()?;
    let color_mode = decoded.color();
    let (original_width, original_height) = (decoded.width(), decoded.height());
    info!(
        width = original_width,
        height = original_height,
        format = ?declared_format,
        color = ?color_mode,
        "decoded source image"
    );

    // One normalized buffer feeds every rendition, so alpha is flattened
    // uniformly even for targets that could carry it.
    let normalized = flatten_onto_white(&decoded);
    drop(decoded);

    let image = clamp_dimensions(normalized, config.max_dimension);
    if image.dimensions() != (original_width, original_height) {
        info!(
            width = image.width(),
            height = image.height(),
            "resized to fit dimension clamp"
        );
    }

    let base_name = strip_extension(source_key);
    let token = disambiguator();

    let mut renditions = Vec::with_capacity(config.variants.len() + 1);

    for spec in &config.variants {
        let data = formats::encode(&image, spec.format, spec.quality)?;
        let key = format!(
            "{}_{}_{}.{}",
            base_name,
            spec.suffix,
            token,
            spec.format.extension()
        );
        debug!(key = %key, format = %spec.format, quality = ?spec.quality, "created variant");
        renditions.push(Rendition {
            key,
            data,
            content_type: spec.format.mime_type(),
            format: spec.format,
            quality: spec.quality,
        });
    }

    let thumb_spec = &config.thumbnail;
    let thumb = thumbnail(&image, thumb_spec.max_width, thumb_spec.max_height);
    let data = formats::jpeg::encode(&thumb, thumb_spec.quality)?;
    let key = format!("{}_{}_{}.jpg", base_name, thumb_spec.suffix, token);
    debug!(key = %key, "created thumbnail");
    renditions.push(Rendition {
        key,
        data,
        content_type: OutputFormat::Jpeg.mime_type(),
        format: OutputFormat::Jpeg,
        quality: Some(thumb_spec.quality),
    });

    Ok(renditions)
}

/// Strip the extension from an object key. The extension is only taken from
/// the final path segment, and a leading dot does not start one.
pub fn strip_extension(key: &str) -> &str {
    let segment_start = key.rfind('/').map_or(0, |slash| slash + 1);
    match key[segment_start..].rfind('.') {
        Some(0) | None => key,
        Some(dot) => &key[..segment_start + dot],
    }
}

/// Random 8-hex-character token shared by all renditions of one call.
/// Random rather than sequential so retried invocations writing to the same
/// prefix cannot collide.
pub fn disambiguator() -> String {
    format!("{:08x}", rand::rng().random::<u32>())
}
