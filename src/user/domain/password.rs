//! Plaintext password policy and stored password hashes.

use super::UserDomainError;
use std::fmt;

/// Shortest accepted password.
const MIN_LENGTH: usize = 8;

/// Longest accepted password.
const MAX_LENGTH: usize = 128;

/// A plaintext password that satisfies the password policy.
///
/// The value is only reachable through [`Password::expose`] and is redacted
/// from `Debug` output. It is never serialised.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Validates a candidate password against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::BlankPassword`],
    /// [`UserDomainError::PasswordTooShort`] or
    /// [`UserDomainError::PasswordTooLong`] when the policy rejects it.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let length = raw.chars().count();

        if length < MIN_LENGTH {
            return Err(UserDomainError::PasswordTooShort(MIN_LENGTH));
        }
        if length > MAX_LENGTH {
            return Err(UserDomainError::PasswordTooLong(MAX_LENGTH));
        }
        if raw.trim().is_empty() {
            return Err(UserDomainError::BlankPassword);
        }

        Ok(Self(raw))
    }

    /// Returns the plaintext for hashing.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// An encoded password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an encoded hash produced by a password hasher or loaded from
    /// storage.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Returns the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
