//! In-memory repository for user accounts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::user::{
    domain::{PasswordHash, PersistedUserData, User, UserProfile, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Username, User>>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn modify(
        &self,
        username: &Username,
        change: impl FnOnce(&mut PersistedUserData),
    ) -> UserRepositoryResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;
        let stored = users
            .get_mut(username)
            .ok_or_else(|| UserRepositoryError::NotFound(username.clone()))?;
        let mut data = PersistedUserData {
            username: stored.username().clone(),
            password_hash: stored.password_hash().clone(),
            roles: stored.roles().to_vec(),
            profile: stored.profile().clone(),
            created_at: stored.created_at(),
            updated_at: stored.updated_at(),
        };
        change(&mut data);
        *stored = User::from_persisted(data);
        Ok(())
    }
}

fn poisoned(err: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.contains_key(user.username()) {
            return Err(UserRepositoryError::DuplicateUsername(
                user.username().clone(),
            ));
        }
        users.insert(user.username().clone(), user.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        username: &Username,
        profile: &UserProfile,
        updated_at: DateTime<Utc>,
    ) -> UserRepositoryResult<()> {
        self.modify(username, |data| {
            data.profile = profile.clone();
            data.updated_at = updated_at;
        })
    }

    async fn update_password_hash(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
        updated_at: DateTime<Utc>,
    ) -> UserRepositoryResult<()> {
        self.modify(username, |data| {
            data.password_hash = password_hash.clone();
            data.updated_at = updated_at;
        })
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(username).cloned())
    }

    async fn exists(&self, username: &Username) -> UserRepositoryResult<bool> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.contains_key(username))
    }
}
