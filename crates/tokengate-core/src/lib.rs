//! # Tokengate Core
//!
//! Foundational types shared by every tokengate crate:
//!
//! - [`errors`]: the HTTP-facing [`AppError`] with JSON response conversion
//! - [`password`]: bcrypt credential hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use tokengate_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//!
//! let error = AppError::unauthorized("Invalid or expired token");
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
