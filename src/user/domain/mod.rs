//! Domain model for user accounts.
//!
//! Usernames, passwords and profile fields are validated on construction so
//! that a [`User`] can only ever hold well-formed values. Plaintext passwords
//! never leave [`Password`]; aggregates only store a [`PasswordHash`].

mod error;
mod password;
mod profile;
mod role;
mod user;
mod username;

pub use error::{ParseRoleError, UserDomainError};
pub use password::{Password, PasswordHash};
pub use profile::{DisplayName, EmailAddress, UserProfile};
pub use role::Role;
pub use user::{PersistedUserData, User, UserCredentials, UserView};
pub use username::Username;
