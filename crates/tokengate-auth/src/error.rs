//! Authentication error taxonomy.
//!
//! Every client-facing variant carries a short human-readable reason and
//! nothing about which claim or check failed. [`AuthError::Internal`] and
//! [`AuthError::Store`] are server faults: they become a generic 500 at the
//! HTTP boundary and their detail is only logged.

use anyhow::anyhow;
use axum::http::StatusCode;
use thiserror::Error;
use tokengate_core::AppError;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Inactive user")]
    InactiveUser,

    #[error("Missing or malformed authorization header")]
    MissingToken,

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Wrong token type")]
    WrongTokenType,

    #[error("Could not authenticate user with provided token")]
    UserNotFound,

    #[error("internal authentication error: {0}")]
    Internal(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Credential and account-state failures answer 400, token failures 401.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials | AuthError::InactiveUser | AuthError::UserNotFound => {
                StatusCode::BAD_REQUEST
            }
            AuthError::MissingToken
            | AuthError::Malformed
            | AuthError::InvalidSignature
            | AuthError::Expired
            | AuthError::WrongTokenType => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) | AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for failures of the presented token itself, as opposed to the
    /// account it names or the store behind it.
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::Malformed
                | AuthError::InvalidSignature
                | AuthError::Expired
                | AuthError::WrongTokenType
        )
    }

    /// Stable label for metrics and structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InactiveUser => "inactive_user",
            AuthError::MissingToken => "missing_token",
            AuthError::Malformed => "malformed",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "expired",
            AuthError::WrongTokenType => "wrong_token_type",
            AuthError::UserNotFound => "user_not_found",
            AuthError::Internal(_) => "internal",
            AuthError::Store(_) => "store",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::new(err.status(), anyhow!(err.to_string()))
    }
}
