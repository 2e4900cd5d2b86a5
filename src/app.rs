//! Wiring of adapters into services and services into [`AppState`].

use std::sync::Arc;

use mockable::DefaultClock;

use crate::db::DbPool;
use crate::http::AppState;
use crate::todo_list::{
    adapters::{memory::InMemoryToDoListRepository, postgres::PostgresToDoListRepository},
    ports::ToDoListRepository,
    services::ListOwnershipService,
};
use crate::user::{
    adapters::{memory::InMemoryUserRepository, postgres::PostgresUserRepository},
    ports::{PasswordHasher, UserRepository},
    services::UserAccountService,
};

/// Builds handler state from concrete repositories and a password hasher.
#[must_use]
pub fn build_state<L, U, H>(lists: L, users: U, hasher: H) -> AppState
where
    L: ToDoListRepository + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let clock = Arc::new(DefaultClock);
    let list_service = ListOwnershipService::new(Arc::new(lists), Arc::clone(&clock));
    let user_service = UserAccountService::new(Arc::new(users), Arc::new(hasher), clock);
    AppState::new(Arc::new(list_service), Arc::new(user_service))
}

/// State backed by process-local storage.
#[must_use]
pub fn in_memory_state<H>(hasher: H) -> AppState
where
    H: PasswordHasher + 'static,
{
    build_state(
        InMemoryToDoListRepository::new(),
        InMemoryUserRepository::new(),
        hasher,
    )
}

/// State backed by `PostgreSQL` through `pool`.
#[must_use]
pub fn postgres_state<H>(pool: &DbPool, hasher: H) -> AppState
where
    H: PasswordHasher + 'static,
{
    build_state(
        PostgresToDoListRepository::new(pool.clone()),
        PostgresUserRepository::new(pool.clone()),
        hasher,
    )
}
