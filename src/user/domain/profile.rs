//! Mutable profile fields of a user account.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted display name, matching the `VARCHAR(100)` column.
const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Longest accepted email address, matching the `VARCHAR(254)` column.
const MAX_EMAIL_LENGTH: usize = 254;

/// Human-friendly name shown instead of the username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Parses an optional display name; blank input yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::DisplayNameTooLong`] when the trimmed value
    /// exceeds 100 characters.
    pub fn parse_optional(value: Option<String>) -> Result<Option<Self>, UserDomainError> {
        let Some(raw) = value else {
            return Ok(None);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(UserDomainError::DisplayNameTooLong(MAX_DISPLAY_NAME_LENGTH));
        }
        Ok(Some(Self(trimmed.to_owned())))
    }

    /// Returns the display name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Syntactically plausible email address.
///
/// Only the shape `local@domain` is checked; deliverability is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidEmail`] when the value does not have
    /// exactly one `@` separating non-empty parts, contains whitespace, or
    /// exceeds 254 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && parts.next().is_none()
            && normalized.chars().count() <= MAX_EMAIL_LENGTH
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(UserDomainError::InvalidEmail(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Parses an optional email address; blank input yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidEmail`] when a non-blank value is
    /// malformed.
    pub fn parse_optional(value: Option<String>) -> Result<Option<Self>, UserDomainError> {
        match value {
            Some(raw) if !raw.trim().is_empty() => Self::new(raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Profile fields a user may change after registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    display_name: Option<DisplayName>,
    email: Option<EmailAddress>,
}

impl UserProfile {
    /// Creates a profile from validated parts.
    #[must_use]
    pub const fn new(display_name: Option<DisplayName>, email: Option<EmailAddress>) -> Self {
        Self {
            display_name,
            email,
        }
    }

    /// Returns the display name, if set.
    #[must_use]
    pub const fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    /// Returns the email address, if set.
    #[must_use]
    pub const fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }
}
