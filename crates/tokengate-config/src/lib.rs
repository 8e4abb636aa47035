//! # Tokengate Config
//!
//! Configuration structures loaded once from environment variables at
//! process start and immutable afterwards:
//!
//! - [`jwt`]: signing secret and token lifetimes
//! - [`server`]: bind address and API prefix
//! - [`cors`]: allowed browser origins
//!
//! Every loader also has a `from_lookup` form taking a key → value function,
//! which is what the tests drive.
//!
//! # Example
//!
//! ```ignore
//! use tokengate_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let server_config = ServerConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod error;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads `key` through `lookup` and parses it, falling back to `default`
/// when the variable is unset or empty.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw.clone(),
        }),
        None => Ok(default),
    }
}
