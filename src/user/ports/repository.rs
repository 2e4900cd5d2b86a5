//! Repository port for user persistence and lookup.

use crate::user::domain::{PasswordHash, User, UserProfile, Username};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a newly registered user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUsername`] when the username is
    /// already taken.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Replaces the profile fields of an existing user.
    ///
    /// Only the profile columns and `updated_at` are written, so a concurrent
    /// password change is never reverted.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not exist.
    async fn update_profile(
        &self,
        username: &Username,
        profile: &UserProfile,
        updated_at: DateTime<Utc>,
    ) -> UserRepositoryResult<()>;

    /// Replaces the password hash of an existing user.
    ///
    /// Only the hash and `updated_at` are written.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not exist.
    async fn update_password_hash(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
        updated_at: DateTime<Utc>,
    ) -> UserRepositoryResult<()>;

    /// Finds a user by username.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>>;

    /// Returns `true` when a user with the username exists.
    async fn exists(&self, username: &Username) -> UserRepositoryResult<bool>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same username already exists.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(Username),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
