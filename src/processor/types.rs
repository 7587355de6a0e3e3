use image::ImageFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    WebP,
    Png,
}

impl OutputFormat {
    /// File extension used in output keys. JPEG uses the conventional short
    /// form rather than its canonical name.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::WebP => "webp",
            OutputFormat::Png => "png",
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::WebP => ImageFormat::WebP,
            OutputFormat::Png => ImageFormat::Png,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::WebP => "image/webp",
            OutputFormat::Png => "image/png",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::WebP => "WebP",
            OutputFormat::Png => "PNG",
        };
        write!(f, "{}", name)
    }
}

/// One rendition to produce: target format, quality (None means lossless or
/// encoder default) and the suffix spliced into the output key.
#[derive(Debug, Clone)]
pub struct VariantSpec {
    pub format: OutputFormat,
    pub quality: Option<u8>,
    pub suffix: String,
}

impl VariantSpec {
    pub fn new(format: OutputFormat, quality: Option<u8>, suffix: impl Into<String>) -> Self {
        Self {
            format,
            quality,
            suffix: suffix.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThumbnailSpec {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
    pub suffix: String,
}

/// Variant set, dimension clamp and thumbnail parameters for one generator
/// run. The default value is the fixed production set.
#[derive(Debug, Clone)]
pub struct VariantConfig {
    /// Encoded in declaration order; order determines output ordering.
    pub variants: Vec<VariantSpec>,
    /// Larger source dimension is clamped to this before encoding.
    pub max_dimension: u32,
    pub thumbnail: ThumbnailSpec,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            variants: vec![
                VariantSpec::new(OutputFormat::Jpeg, Some(85), "compressed"),
                VariantSpec::new(OutputFormat::Jpeg, Some(60), "low"),
                VariantSpec::new(OutputFormat::WebP, Some(85), "webp"),
                VariantSpec::new(OutputFormat::Png, None, "png"),
            ],
            max_dimension: 4096,
            thumbnail: ThumbnailSpec {
                max_width: 300,
                max_height: 300,
                quality: 80,
                suffix: "thumbnail".to_string(),
            },
        }
    }
}

/// One encoded output image, ready to be persisted by the caller.
#[derive(Debug, Clone)]
pub struct Rendition {
    pub key: String,
    pub data: Vec<u8>,
    pub content_type: &'static str,
    pub format: OutputFormat,
    pub quality: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_uses_short_extension() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::WebP.extension(), "webp");
        assert_eq!(OutputFormat::Png.extension(), "png");
    }

    #[test]
    fn mime_types_match_formats() {
        assert_eq!(OutputFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::WebP.mime_type(), "image/webp");
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn default_variant_set_is_fixed() {
        let config = VariantConfig::default();
        let suffixes: Vec<&str> = config.variants.iter().map(|v| v.suffix.as_str()).collect();
        assert_eq!(suffixes, ["compressed", "low", "webp", "png"]);
        assert_eq!(config.max_dimension, 4096);
        assert_eq!(config.thumbnail.quality, 80);
        assert_eq!(config.thumbnail.suffix, "thumbnail");
    }
}
