//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing secret, at least [`MIN_SECRET_LEN`] bytes.
//!   Required unless `APP_ENV=development`.
//! - `ACCESS_TOKEN_EXPIRE_MINUTES`: access token lifetime (default: 15)
//! - `REFRESH_TOKEN_EXPIRE_DAYS`: refresh token lifetime (default: 30)

use std::env;

use crate::{ConfigError, parse_or};

pub const MIN_SECRET_LEN: usize = 32;

/// Upper bound for either token lifetime: ten years, in seconds.
pub const MAX_LIFETIME_SECS: i64 = 10 * 365 * 24 * 60 * 60;

const DEV_SECRET: &str = "development-only-secret-change-me-before-deploying";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let development = lookup("APP_ENV").is_some_and(|v| v.eq_ignore_ascii_case("development"));

        let secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if development => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                DEV_SECRET.to_string()
            }
            None => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let access_minutes: i64 = parse_or(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES", 15)?;
        let refresh_days: i64 = parse_or(&lookup, "REFRESH_TOKEN_EXPIRE_DAYS", 30)?;

        let config = Self {
            secret,
            access_token_expiry: to_seconds("ACCESS_TOKEN_EXPIRE_MINUTES", access_minutes, 60)?,
            refresh_token_expiry: to_seconds(
                "REFRESH_TOKEN_EXPIRE_DAYS",
                refresh_days,
                24 * 60 * 60,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LEN,
                actual: self.secret.len(),
            });
        }
        if self.access_token_expiry <= 0 {
            return Err(ConfigError::NonPositiveLifetime(
                "ACCESS_TOKEN_EXPIRE_MINUTES",
            ));
        }
        if self.refresh_token_expiry <= 0 {
            return Err(ConfigError::NonPositiveLifetime("REFRESH_TOKEN_EXPIRE_DAYS"));
        }
        if self.access_token_expiry > MAX_LIFETIME_SECS {
            return Err(ConfigError::LifetimeTooLong("ACCESS_TOKEN_EXPIRE_MINUTES"));
        }
        if self.refresh_token_expiry > MAX_LIFETIME_SECS {
            return Err(ConfigError::LifetimeTooLong("REFRESH_TOKEN_EXPIRE_DAYS"));
        }
        Ok(())
    }
}

fn to_seconds(key: &'static str, amount: i64, unit: i64) -> Result<i64, ConfigError> {
    amount
        .checked_mul(unit)
        .ok_or(ConfigError::LifetimeTooLong(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const SECRET: &str = "test-secret-key-at-least-32-characters-long";

    #[test]
    fn test_defaults() {
        let config = JwtConfig::from_lookup(lookup_from(&[("JWT_SECRET", SECRET)])).unwrap();
        assert_eq!(config.secret, SECRET);
        assert_eq!(config.access_token_expiry, 15 * 60);
        assert_eq!(config.refresh_token_expiry, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_lifetimes_are_converted_to_seconds() {
        let config = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "60"),
            ("REFRESH_TOKEN_EXPIRE_DAYS", "7"),
        ]))
        .unwrap();
        assert_eq!(config.access_token_expiry, 3600);
        assert_eq!(config.refresh_token_expiry, 604800);
    }

    #[test]
    fn test_overflowing_lifetime_rejected() {
        let err = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "9223372036854775807"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::LifetimeTooLong("ACCESS_TOKEN_EXPIRE_MINUTES")
        );
    }

    #[test]
    fn test_lifetime_above_bound_rejected() {
        let err = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "153722867280912930"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::LifetimeTooLong("ACCESS_TOKEN_EXPIRE_MINUTES")
        );

        let err = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("REFRESH_TOKEN_EXPIRE_DAYS", "36600"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::LifetimeTooLong("REFRESH_TOKEN_EXPIRE_DAYS"));
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let err = JwtConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_missing_secret_allowed_in_development() {
        let config = JwtConfig::from_lookup(lookup_from(&[("APP_ENV", "development")])).unwrap();
        assert_eq!(config.secret, DEV_SECRET);
    }

    #[test]
    fn test_short_secret_rejected() {
        let err = JwtConfig::from_lookup(lookup_from(&[("JWT_SECRET", "short")])).unwrap_err();
        assert_eq!(err, ConfigError::SecretTooShort { min: 32, actual: 5 });
    }

    #[test]
    fn test_unparsable_lifetime_rejected() {
        let err = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_lifetime_rejected() {
        let err = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("REFRESH_TOKEN_EXPIRE_DAYS", "0"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NonPositiveLifetime("REFRESH_TOKEN_EXPIRE_DAYS")
        );
    }
}
