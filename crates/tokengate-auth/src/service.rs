//! Token service: login, refresh and identity resolution.
//!
//! Every call is independent. The service keeps no record of issued tokens:
//! a token is valid exactly as long as its signature verifies and its `exp`
//! has not passed, and the user it names is still present and active.

use std::sync::LazyLock;

use serde::Serialize;
use tokengate_config::JwtConfig;
use tokengate_core::{hash_password, verify_password};
use tracing::{debug, instrument};

use crate::claims::{Claims, TokenType};
use crate::error::AuthError;
use crate::jwt::TokenCodec;
use crate::store::{PublicUser, UserId, UserStore};

// Checked in place of a stored hash when the identifier is unknown, so that
// path costs one bcrypt verification at the default cost too.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("tokengate-unknown-identifier").ok());

/// Token lifetimes in seconds, fixed per token type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: i64,
    pub refresh: i64,
}

impl TokenLifetimes {
    pub fn for_type(&self, token_type: TokenType) -> i64 {
        match token_type {
            TokenType::Access => self.access,
            TokenType::Refresh => self.refresh,
        }
    }
}

impl From<&JwtConfig> for TokenLifetimes {
    fn from(config: &JwtConfig) -> Self {
        Self {
            access: config.access_token_expiry,
            refresh: config.refresh_token_expiry,
        }
    }
}

/// Tokens returned by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

/// Token returned by a successful refresh.
#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
    pub access_token: String,
}

/// The caller behind a verified token, scoped to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub user_id: UserId,
    pub is_active: bool,
    pub user: PublicUser,
}

pub struct TokenService<S> {
    store: S,
    codec: TokenCodec,
    lifetimes: TokenLifetimes,
}

impl<S> std::fmt::Debug for TokenService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("codec", &self.codec)
            .field("lifetimes", &self.lifetimes)
            .finish_non_exhaustive()
    }
}

impl<S: UserStore> TokenService<S> {
    pub fn new(store: S, codec: TokenCodec, lifetimes: TokenLifetimes) -> Self {
        Self {
            store,
            codec,
            lifetimes,
        }
    }

    pub fn from_config(store: S, config: &JwtConfig) -> Self {
        Self::new(store, TokenCodec::from_config(config), config.into())
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Authenticates `identifier` + `password` and issues a token pair.
    ///
    /// An unknown identifier and a wrong password fail with the same
    /// [`AuthError::InvalidCredentials`], and both pay for a bcrypt
    /// verification. The active flag is only checked once the password
    /// matched.
    #[instrument(skip_all)]
    pub async fn login(&self, identifier: &str, password: &str) -> Result<TokenPair, AuthError> {
        let Some(user) = self.store.find_by_identifier(identifier).await? else {
            verify_against_dummy(password).await;
            return Err(AuthError::InvalidCredentials);
        };

        if !check_password(password, &user.password_hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }

        let subject = user.id.to_string();
        let pair = TokenPair {
            access_token: self.issue(&subject, TokenType::Access)?,
            refresh_token: self.issue(&subject, TokenType::Refresh)?,
            token_type: "bearer",
        };

        debug!(user_id = user.id, "Issued token pair");
        Ok(pair)
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The refresh token itself stays valid until its own expiry.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AuthError> {
        let identity = self
            .resolve_identity(refresh_token, TokenType::Refresh)
            .await?;

        let access_token = self.issue(&identity.user_id.to_string(), TokenType::Access)?;

        debug!(user_id = identity.user_id, "Refreshed access token");
        Ok(AccessToken { access_token })
    }

    /// Verifies `token`, requires it to be of `required` type and reloads the
    /// user it names.
    #[instrument(skip(self, token))]
    pub async fn resolve_identity(
        &self,
        token: &str,
        required: TokenType,
    ) -> Result<AuthenticatedIdentity, AuthError> {
        let claims = self.codec.decode(token)?;

        if claims.token_type != required {
            return Err(AuthError::WrongTokenType);
        }

        let user_id = subject_id(&claims)?;
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }

        Ok(AuthenticatedIdentity {
            user_id: user.id,
            is_active: user.is_active,
            user: PublicUser::from(&user),
        })
    }

    fn issue(&self, subject: &str, token_type: TokenType) -> Result<String, AuthError> {
        self.codec
            .issue(subject, token_type, self.lifetimes.for_type(token_type))
    }
}

// bcrypt verification runs on the blocking pool.
async fn check_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let hash = hash.to_owned();

    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::Internal(format!("password verification task failed: {}", e)))?
        .map_err(|e| AuthError::Internal(e.error.to_string()))
}

async fn verify_against_dummy(password: &str) {
    let password = password.to_owned();
    let _ = tokio::task::spawn_blocking(move || {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = verify_password(&password, hash);
        }
    })
    .await;
}

fn subject_id(claims: &Claims) -> Result<UserId, AuthError> {
    claims.sub.parse().map_err(|_| AuthError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_hash_uses_default_cost() {
        let hash = DUMMY_HASH.as_deref().unwrap();
        assert!(hash.starts_with(&format!("$2b${}$", bcrypt::DEFAULT_COST)));
        assert!(!verify_password("", hash).unwrap());
    }
}
