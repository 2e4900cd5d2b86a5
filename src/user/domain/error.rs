//! Error types for user domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username is shorter or longer than allowed.
    #[error("username must be between {min} and {max} characters")]
    UsernameLength {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The username contains characters outside `[A-Za-z0-9_.-]`.
    #[error(
        "username '{0}' contains invalid characters (only letters, digits, '_', '-' and '.' allowed)"
    )]
    InvalidUsername(String),

    /// The password is shorter than the policy minimum.
    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),

    /// The password is longer than the policy maximum.
    #[error("password must be at most {0} characters")]
    PasswordTooLong(usize),

    /// The password consists only of whitespace.
    #[error("password must not be blank")]
    BlankPassword,

    /// The display name exceeds its storage limit.
    #[error("display name exceeds {0} character limit")]
    DisplayNameTooLong(usize),

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
