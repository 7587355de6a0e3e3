use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
