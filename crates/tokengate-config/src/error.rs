use thiserror::Error;

/// Startup configuration failures. All of them are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("JWT_SECRET must be at least {min} bytes long (got {actual})")]
    SecretTooShort { min: usize, actual: usize },

    #[error("{0} must be greater than zero")]
    NonPositiveLifetime(&'static str),

    #[error("{0} is too long (at most ten years)")]
    LifetimeTooLong(&'static str),
}
