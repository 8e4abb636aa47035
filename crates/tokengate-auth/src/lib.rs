//! # Tokengate Auth
//!
//! Credential login and stateless token handling for tokengate.
//!
//! This crate provides:
//!
//! - [`claims`]: the claim layout shared by access and refresh tokens
//! - [`jwt`]: [`TokenCodec`], which signs and verifies tokens
//! - [`store`]: the read-only [`UserStore`] contract and an in-memory store
//! - [`service`]: [`TokenService`], which orchestrates login, refresh and
//!   identity resolution
//! - [`error`]: the [`AuthError`] taxonomy and its HTTP mapping
//!
//! # Token Types
//!
//! - **Access Token**: short-lived (minutes), presented on protected requests
//! - **Refresh Token**: long-lived (days), accepted only to mint new access
//!   tokens
//!
//! The two are never interchangeable: the `type` claim is signed with the
//! rest of the payload and checked on every use.
//!
//! # Example
//!
//! ```ignore
//! use tokengate_auth::{InMemoryUserStore, TokenService, TokenType};
//! use tokengate_config::JwtConfig;
//!
//! let service = TokenService::from_config(InMemoryUserStore::new(), &JwtConfig::from_env()?);
//!
//! let pair = service.login("user@example.com", "password").await?;
//! let identity = service.resolve_identity(&pair.access_token, TokenType::Access).await?;
//! println!("User ID: {}", identity.user_id);
//! ```

pub mod claims;
pub mod error;
pub mod jwt;
pub mod service;
pub mod store;

// Re-export commonly used types at crate root
pub use claims::{Claims, TokenType};
pub use error::AuthError;
pub use jwt::TokenCodec;
pub use service::{AccessToken, AuthenticatedIdentity, TokenLifetimes, TokenPair, TokenService};
pub use store::{InMemoryUserStore, PublicUser, StoreError, User, UserId, UserStore};
