//! Token codec: signs and verifies self-contained HS256 JWTs.
//!
//! The codec is built once from the process-wide signing secret and is
//! read-only afterwards, so it is shared freely across request tasks.
//!
//! # Example
//!
//! ```ignore
//! use tokengate_auth::{TokenCodec, TokenType};
//! use tokengate_config::JwtConfig;
//!
//! let codec = TokenCodec::from_config(&JwtConfig::from_env()?);
//!
//! let token = codec.issue("7", TokenType::Access, 15 * 60)?;
//! let claims = codec.decode(&token)?;
//! assert_eq!(claims.sub, "7");
//! ```

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use tokengate_config::JwtConfig;

use crate::claims::{Claims, TokenType};
use crate::error::AuthError;

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.secret.as_bytes())
    }

    /// Signs a token for `subject` with `exp = issued_at + lifetime`.
    ///
    /// `issued_at` and `lifetime` are in seconds.
    pub fn encode(
        &self,
        subject: &str,
        token_type: TokenType,
        issued_at: i64,
        lifetime: i64,
    ) -> Result<String, AuthError> {
        let exp = issued_at.checked_add(lifetime).ok_or_else(|| {
            AuthError::Internal(format!("{} token lifetime overflows exp", token_type))
        })?;

        let claims = Claims {
            sub: subject.to_string(),
            token_type,
            iat: issued_at,
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to create {} token: {}", token_type, e)))
    }

    /// Signs a token issued now.
    pub fn issue(
        &self,
        subject: &str,
        token_type: TokenType,
        lifetime: i64,
    ) -> Result<String, AuthError> {
        self.encode(subject, token_type, Utc::now().timestamp(), lifetime)
    }

    /// Verifies the signature, then the expiry, and only then returns the
    /// claims.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidSignature`]: tampered token, wrong key or
    ///   unexpected algorithm
    /// - [`AuthError::Expired`]: `exp` is in the past
    /// - [`AuthError::Malformed`]: anything that is not a well-formed token
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Malformed,
            })
    }
}
