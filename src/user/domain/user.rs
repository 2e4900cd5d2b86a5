//! User aggregate root and its read-only projections.

use super::{PasswordHash, Role, UserProfile, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// User aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: Username,
    password_hash: PasswordHash,
    roles: Vec<Role>,
    profile: UserProfile,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted username.
    pub username: Username,
    /// Persisted password hash.
    pub password_hash: PasswordHash,
    /// Persisted roles.
    pub roles: Vec<Role>,
    /// Persisted profile fields.
    pub profile: UserProfile,
    /// Persisted registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Registers a new user holding the [`Role::User`] authority.
    #[must_use]
    pub fn register(
        username: Username,
        password_hash: PasswordHash,
        profile: UserProfile,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            username,
            password_hash,
            roles: vec![Role::User],
            profile,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            username: data.username,
            password_hash: data.password_hash,
            roles: data.roles,
            profile: data.profile,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the stored password hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns the granted roles.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Returns the profile fields.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the stored password hash.
    pub fn change_password(&mut self, password_hash: PasswordHash, clock: &impl Clock) {
        self.password_hash = password_hash;
        self.updated_at = clock.utc();
    }

    /// Replaces the profile fields.
    pub fn update_profile(&mut self, profile: UserProfile, clock: &impl Clock) {
        self.profile = profile;
        self.updated_at = clock.utc();
    }

    /// Returns the credentials used to authenticate this user.
    #[must_use]
    pub fn credentials(&self) -> UserCredentials {
        UserCredentials {
            username: self.username.clone(),
            password_hash: self.password_hash.clone(),
            roles: self.roles.clone(),
        }
    }

    /// Returns the public projection without credentials.
    #[must_use]
    pub fn view(&self) -> UserView {
        UserView {
            username: self.username.clone(),
            roles: self.roles.clone(),
            profile: self.profile.clone(),
            created_at: self.created_at,
        }
    }
}

/// Username, password hash and authorities of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// Authenticated username.
    pub username: Username,
    /// Stored password hash.
    pub password_hash: PasswordHash,
    /// Granted roles.
    pub roles: Vec<Role>,
}

impl UserCredentials {
    /// Returns `true` when the credentials carry `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Public projection of a user, safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    /// Username.
    pub username: Username,
    /// Granted roles.
    pub roles: Vec<Role>,
    /// Profile fields.
    pub profile: UserProfile,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}
