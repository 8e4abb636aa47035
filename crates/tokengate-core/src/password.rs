//! Credential hashing and verification.
//!
//! Hashes are bcrypt strings: the algorithm version, cost and salt are
//! embedded in the stored hash, so verification needs nothing but the hash
//! itself. bcrypt compares digests in constant time.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch. A stored hash that cannot be parsed is an
/// `Err`, never a match.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}
