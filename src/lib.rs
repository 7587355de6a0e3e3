use thiserror::Error;

pub mod events;
pub mod handler;
pub mod metrics;
pub mod processor;
pub mod store;

pub const ENV_OUTPUT_BUCKET: &str = "PROCESSED_BUCKET";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LARGE_IMAGE_WARN_BYTES: &str = "LARGE_IMAGE_WARN_BYTES";

const DEFAULT_LARGE_IMAGE_WARN_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Bucket (or bucket-like location) renditions are written to.
    pub output_bucket: String,
    pub log_level: String,
    /// Inputs declared larger than this are logged as a warning.
    pub large_image_warn_bytes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable lookup. `from_env` is a thin
    /// wrapper over this; tests supply a closure instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let output_bucket =
            lookup(ENV_OUTPUT_BUCKET).ok_or(ConfigError::MissingVar(ENV_OUTPUT_BUCKET))?;

        let log_level = lookup(ENV_LOG_LEVEL).unwrap_or_else(|| "info".to_string());

        let large_image_warn_bytes = match lookup(ENV_LARGE_IMAGE_WARN_BYTES) {
            Some(value) => value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: ENV_LARGE_IMAGE_WARN_BYTES,
                value,
            })?,
            None => DEFAULT_LARGE_IMAGE_WARN_BYTES,
        };

        Ok(Self {
            output_bucket,
            log_level,
            large_image_warn_bytes,
        })
    }
}
