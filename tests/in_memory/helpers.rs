//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use todo_api::todo_list::{
    adapters::memory::InMemoryToDoListRepository, services::ListOwnershipService,
};
use todo_api::user::{
    adapters::{argon2::Argon2PasswordHasher, memory::InMemoryUserRepository},
    domain::Username,
    services::UserAccountService,
};

/// List service over a fresh in-memory repository.
pub type ListService = ListOwnershipService<InMemoryToDoListRepository, DefaultClock>;

/// User service over a fresh in-memory repository.
pub type UserService =
    UserAccountService<InMemoryUserRepository, Argon2PasswordHasher, DefaultClock>;

/// Provides a list service with no stored lists.
#[fixture]
pub fn list_service() -> ListService {
    ListOwnershipService::new(
        Arc::new(InMemoryToDoListRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Provides a user service with cheap hashing parameters.
///
/// # Panics
///
/// Panics if the fixed Argon2 parameters are rejected.
#[fixture]
pub fn user_service() -> UserService {
    let hasher = Argon2PasswordHasher::with_cost(8, 1, 1).expect("valid argon2 parameters");
    UserAccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(hasher),
        Arc::new(DefaultClock),
    )
}

/// Parses a username used by a test.
///
/// # Errors
///
/// Returns an error when `raw` is not a valid username.
pub fn user(raw: &str) -> Result<Username, eyre::Report> {
    Username::new(raw).map_err(|err| eyre::eyre!("invalid username {raw:?}: {err}"))
}
