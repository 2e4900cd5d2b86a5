//! Shared `PostgreSQL` connection pool and schema bootstrap.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use thiserror::Error;

/// `PostgreSQL` connection pool type shared by all adapters.
pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// SQL creating the user table.
pub const CREATE_USERS_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_users/up.sql");

/// SQL creating the to-do list and task tables.
pub const CREATE_TODO_LISTS_SQL: &str =
    include_str!("../../migrations/2026-10-01-000001_create_todo_lists/up.sql");

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum DbError {
    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// A migration script failed.
    #[error("failed to apply migrations: {0}")]
    Migration(#[from] diesel::result::Error),

    /// The blocking bootstrap task panicked or was cancelled.
    #[error("schema bootstrap task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`DbError::Pool`] when no connection can be established.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<DbPool, DbError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().max_size(max_size).build(manager)?;
    Ok(pool)
}

/// Applies every schema migration in order.
///
/// The scripts are idempotent, so this is safe to run on each start.
///
/// # Errors
///
/// Returns [`DbError::Migration`] when a script fails.
pub fn apply_migrations(connection: &mut PgConnection) -> Result<(), DbError> {
    connection.batch_execute(CREATE_USERS_SQL)?;
    connection.batch_execute(CREATE_TODO_LISTS_SQL)?;
    Ok(())
}

/// Checks out a pooled connection on the blocking pool and migrates it.
///
/// # Errors
///
/// Returns [`DbError`] when no connection is available or a script fails.
pub async fn migrate(pool: &DbPool) -> Result<(), DbError> {
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared.get()?;
        apply_migrations(&mut connection)
    })
    .await?
}
