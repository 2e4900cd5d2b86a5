//! Service layer for registration, profile changes and authentication.

use crate::user::{
    domain::{
        DisplayName, EmailAddress, Password, PasswordHash, User, UserCredentials, UserProfile,
        UserView, Username,
    },
    ports::{HashingError, PasswordHasher, UserRepository, UserRepositoryError},
};
use crate::validation::ValidationErrors;
use async_trait::async_trait;
use mockable::Clock;
use std::fmt;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Password hashed once per service so that unknown usernames cost a full
/// verification, like known ones.
const DECOY_PASSWORD: &str = "decoy-password-never-matches";

/// Request payload for registering a new user.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    username: String,
    password: String,
    display_name: Option<String>,
    email: Option<String>,
}

impl RegisterUserRequest {
    /// Creates a request with the required credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            display_name: None,
            email: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .finish()
    }
}

/// Request payload replacing the profile fields of an existing user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    username: Username,
    display_name: Option<String>,
    email: Option<String>,
}

impl UpdateUserRequest {
    /// Creates a request that clears every profile field of `username`.
    #[must_use]
    pub const fn new(username: Username) -> Self {
        Self {
            username,
            display_name: None,
            email: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Service-level errors for user account operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// No user with the username exists.
    #[error("user {0} not found")]
    UserNotFound(Username),

    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The username or password did not match a stored account.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Repository operation failed.
    #[error(transparent)]
    Repository(UserRepositoryError),

    /// Password hashing failed.
    #[error(transparent)]
    Hashing(#[from] HashingError),
}

impl From<UserRepositoryError> for UserServiceError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::NotFound(username) => Self::UserNotFound(username),
            UserRepositoryError::DuplicateUsername(username) => Self::Validation(
                ValidationErrors::single("username", format!("username '{username}' is already taken")),
            ),
            UserRepositoryError::Persistence(_) => Self::Repository(err),
        }
    }
}

/// Result type for user service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User account operations consumed by the transport layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Returns the credentials and authorities of `username`.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::UserNotFound`] when the user does not
    /// exist.
    async fn load_user_for_authentication(
        &self,
        username: &Username,
    ) -> UserServiceResult<UserCredentials>;

    /// Verifies `password` for `username` and returns the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::InvalidCredentials`] for unknown users and
    /// wrong passwords alike.
    async fn authenticate(
        &self,
        username: &Username,
        password: &str,
    ) -> UserServiceResult<UserCredentials>;

    /// Returns the public view of `username`.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::UserNotFound`] when the user does not
    /// exist.
    async fn get_user_by_username(&self, username: &Username) -> UserServiceResult<UserView>;

    /// Registers a new user with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Validation`] when a field is invalid or the
    /// username is taken.
    async fn create_user(&self, request: RegisterUserRequest) -> UserServiceResult<UserView>;

    /// Replaces the profile fields of an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::UserNotFound`] or
    /// [`UserServiceError::Validation`].
    async fn update_user(&self, request: UpdateUserRequest) -> UserServiceResult<UserView>;

    /// Hashes and stores a new password.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::UserNotFound`] or
    /// [`UserServiceError::Validation`] when the password violates the policy.
    async fn change_password(&self, username: &Username, new_password: String)
    -> UserServiceResult<()>;

    /// Returns `true` when `username` is registered.
    async fn user_exists(&self, username: &Username) -> bool;
}

/// User account orchestration service.
#[derive(Clone)]
pub struct UserAccountService<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<C>,
    decoy_hash: OnceLock<PasswordHash>,
}

impl<R, H, C> UserAccountService<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a new user account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hasher,
            clock,
            decoy_hash: OnceLock::new(),
        }
    }

    async fn require_user(&self, username: &Username) -> UserServiceResult<User> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserServiceError::UserNotFound(username.clone()))
    }

    async fn hash_password(&self, password: Password) -> UserServiceResult<PasswordHash> {
        let hasher = Arc::clone(&self.hasher);
        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(HashingError::new)?;
        Ok(hashed?)
    }

    async fn decoy_hash(&self) -> UserServiceResult<PasswordHash> {
        if let Some(hash) = self.decoy_hash.get() {
            return Ok(hash.clone());
        }
        let password = Password::new(DECOY_PASSWORD).map_err(HashingError::new)?;
        let hashed = self.hash_password(password).await?;
        Ok(self.decoy_hash.get_or_init(|| hashed).clone())
    }

    async fn verify_password(&self, candidate: &str, hash: &PasswordHash) -> UserServiceResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let candidate_owned = candidate.to_owned();
        let hash_owned = hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || hasher.verify(&candidate_owned, &hash_owned))
                .await
                .map_err(HashingError::new)?;
        Ok(verified?)
    }
}

#[async_trait]
impl<R, H, C> UserService for UserAccountService<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    C: Clock + Send + Sync,
{
    async fn load_user_for_authentication(
        &self,
        username: &Username,
    ) -> UserServiceResult<UserCredentials> {
        let user = self.require_user(username).await?;
        Ok(user.credentials())
    }

    async fn authenticate(
        &self,
        username: &Username,
        password: &str,
    ) -> UserServiceResult<UserCredentials> {
        let Some(user) = self.repository.find_by_username(username).await? else {
            let decoy = self.decoy_hash().await?;
            if let Err(err) = self.verify_password(password, &decoy).await {
                error!(error = %err, "decoy password verification failed");
            }
            warn!(%username, "authentication failed: unknown user");
            return Err(UserServiceError::InvalidCredentials);
        };

        if !self.verify_password(password, user.password_hash()).await? {
            warn!(%username, "authentication failed: password mismatch");
            return Err(UserServiceError::InvalidCredentials);
        }

        debug!(%username, "authenticated");
        Ok(user.credentials())
    }

    async fn get_user_by_username(&self, username: &Username) -> UserServiceResult<UserView> {
        let user = self.require_user(username).await?;
        Ok(user.view())
    }

    async fn create_user(&self, request: RegisterUserRequest) -> UserServiceResult<UserView> {
        let RegisterUserRequest {
            username,
            password,
            display_name,
            email,
        } = request;

        let mut errors = ValidationErrors::new();
        let valid_username = errors.check("username", Username::new(username));
        let valid_password = errors.check("password", Password::new(password));
        let valid_display_name =
            errors.check("display_name", DisplayName::parse_optional(display_name));
        let valid_email = errors.check("email", EmailAddress::parse_optional(email));

        let (Some(username), Some(password), Some(display_name), Some(email)) = (
            valid_username,
            valid_password,
            valid_display_name,
            valid_email,
        ) else {
            return Err(errors.into());
        };

        if self.repository.exists(&username).await? {
            return Err(UserRepositoryError::DuplicateUsername(username).into());
        }

        let password_hash = self.hash_password(password).await?;
        let user = User::register(
            username,
            password_hash,
            UserProfile::new(display_name, email),
            &*self.clock,
        );
        self.repository.store(&user).await?;

        info!(username = %user.username(), "registered user");
        Ok(user.view())
    }

    async fn update_user(&self, request: UpdateUserRequest) -> UserServiceResult<UserView> {
        let UpdateUserRequest {
            username,
            display_name,
            email,
        } = request;

        let mut errors = ValidationErrors::new();
        let valid_display_name =
            errors.check("display_name", DisplayName::parse_optional(display_name));
        let valid_email = errors.check("email", EmailAddress::parse_optional(email));
        let (Some(display_name), Some(email)) = (valid_display_name, valid_email) else {
            return Err(errors.into());
        };

        let mut user = self.require_user(&username).await?;
        user.update_profile(UserProfile::new(display_name, email), &*self.clock);
        self.repository
            .update_profile(&username, user.profile(), user.updated_at())
            .await?;

        info!(%username, "updated user profile");
        Ok(user.view())
    }

    async fn change_password(
        &self,
        username: &Username,
        new_password: String,
    ) -> UserServiceResult<()> {
        let password = Password::new(new_password)
            .map_err(|err| ValidationErrors::single("password", err.to_string()))?;

        let mut user = self.require_user(username).await?;
        let password_hash = self.hash_password(password).await?;
        user.change_password(password_hash, &*self.clock);
        self.repository
            .update_password_hash(username, user.password_hash(), user.updated_at())
            .await?;

        info!(%username, "changed password");
        Ok(())
    }

    async fn user_exists(&self, username: &Username) -> bool {
        self.repository
            .exists(username)
            .await
            .unwrap_or_else(|err| {
                error!(%username, error = %err, "user existence check failed");
                false
            })
    }
}
