//! Port for one-way password hashing.

use crate::user::domain::{Password, PasswordHash};
use thiserror::Error;

/// Password hashing contract.
///
/// Implementations are CPU-bound and synchronous; services call them from the
/// blocking thread pool.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a policy-compliant password with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns [`HashingError`] when the hashing backend fails.
    fn hash(&self, password: &Password) -> Result<PasswordHash, HashingError>;

    /// Checks a candidate password against a stored hash.
    ///
    /// Returns `Ok(false)` when the password does not match.
    ///
    /// # Errors
    ///
    /// Returns [`HashingError`] when the stored hash cannot be parsed or the
    /// backend fails.
    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, HashingError>;
}

/// Failure raised by a password hashing backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("password hashing failed: {0}")]
pub struct HashingError(pub String);

impl HashingError {
    /// Creates a hashing error from any displayable cause.
    pub fn new(cause: impl std::fmt::Display) -> Self {
        Self(cause.to_string())
    }
}
