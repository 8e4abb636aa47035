//! JWT claim structures.
//!
//! Access and refresh tokens share one claim layout and are told apart by the
//! `type` claim. Because the discriminator sits inside the signed payload, a
//! token cannot be relabelled without invalidating its signature.

use serde::{Deserialize, Serialize};

/// Token type discriminator carried in every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived token presented on every protected request.
    Access,
    /// Long-lived token accepted only by the refresh endpoint.
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims embedded in every token.
///
/// # Fields
///
/// - `sub`: user identifier (subject)
/// - `type`: access or refresh
/// - `iat`: issued-at (Unix seconds)
/// - `exp`: expiry (Unix seconds), always `iat` + the lifetime for `type`
/// - `jti`: unique token id, so two tokens issued in the same second differ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}
