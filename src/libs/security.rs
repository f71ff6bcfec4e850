//! Employee password hashing.
//!
//! Hashes are Argon2id PHC strings with a random salt, so the algorithm
//! parameters travel with the stored value.

use crate::libs::error::{StoreError, StoreResult};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn hash_password(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::validation(format!("Cannot hash password: {}", e)))
}

/// Checks `password` against a stored hash.
///
/// A malformed stored hash never authenticates; it is logged and treated as a
/// mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "malformed password hash");
            return false;
        }
    };
    Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}

pub fn validate_password_strength(password: &str) -> StoreResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(StoreError::validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}
