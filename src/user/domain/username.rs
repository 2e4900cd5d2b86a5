//! Validated username type.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shortest accepted username.
const MIN_LENGTH: usize = 3;

/// Longest accepted username, matching the `VARCHAR(50)` column.
const MAX_LENGTH: usize = 50;

/// Unique, case-sensitive user identifier.
///
/// Usernames are trimmed and may contain ASCII letters, digits, `_`, `-` and
/// `.`. The same value names the owner of every to-do list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyUsername`] when the value is blank,
    /// [`UserDomainError::UsernameLength`] when it is outside 3..=50
    /// characters, or [`UserDomainError::InvalidUsername`] when it contains
    /// characters outside `[A-Za-z0-9_.-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(UserDomainError::EmptyUsername);
        }

        let length = normalized.chars().count();
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(UserDomainError::UsernameLength {
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            });
        }

        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !is_valid {
            return Err(UserDomainError::InvalidUsername(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
