use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use error_location::ErrorLocation;

/// Argon2id password hashing.
///
/// Hashes are salted PHC strings; verification is constant-time by
/// construction, so wrong-password and unknown-user failures are not
/// distinguishable through this layer.
#[derive(Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a clear-text password with a fresh random salt.
    #[track_caller]
    pub fn hash(&self, password: &str) -> AuthErrorResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHash {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(hash.to_string())
    }

    /// Check a candidate password against a stored PHC hash string.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only for malformed hashes.
    #[track_caller]
    pub fn verify(&self, password: &str, stored_hash: &str) -> AuthErrorResult<bool> {
        let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::PasswordHash {
            message: format!("stored hash is malformed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::PasswordHash {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
