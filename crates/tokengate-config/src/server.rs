//! HTTP server configuration.
//!
//! # Environment Variables
//!
//! - `SERVER_HOST` (default: `0.0.0.0`)
//! - `SERVER_PORT` (default: `3000`)
//! - `API_V1_STR`: route prefix for the versioned API (default: `/api/v1`)

use std::env;

use crate::{ConfigError, parse_or};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_prefix: "/api/v1".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("SERVER_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = parse_or(&lookup, "SERVER_PORT", defaults.port)?;

        let api_prefix = match lookup("API_V1_STR") {
            Some(raw) => normalize_prefix(&raw).ok_or(ConfigError::Invalid {
                key: "API_V1_STR",
                value: raw,
            })?,
            None => defaults.api_prefix,
        };

        Ok(Self {
            host,
            port,
            api_prefix,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `api/v1/` → `/api/v1`. An empty or root-only prefix is rejected since
/// axum cannot nest at `/`.
fn normalize_prefix(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}
