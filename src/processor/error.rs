use thiserror::Error;

use super::types::OutputFormat;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("failed to decode source image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("unsupported source format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to encode {format} rendition: {message}")]
    Encode {
        format: OutputFormat,
        message: String,
    },
}

impl ProcessorError {
    pub(super) fn encode(format: OutputFormat, error: impl std::fmt::Display) -> Self {
        ProcessorError::Encode {
            format,
            message: error.to_string(),
        }
    }
}
