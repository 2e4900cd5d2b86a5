//! `PostgreSQL` repository implementation for user storage.

use super::{
    models::{UserRecord, UserRow},
    schema::users,
};
use crate::db::DbPool;
use crate::user::{
    domain::{
        DisplayName, EmailAddress, PasswordHash, PersistedUserData, Role, User, UserProfile,
        Username,
    },
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: DbPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let username = user.username().clone();
        let record = to_record(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&record)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUsername(username.clone())
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_profile(
        &self,
        username: &Username,
        profile: &UserProfile,
        updated_at: DateTime<Utc>,
    ) -> UserRepositoryResult<()> {
        let target = username.clone();
        let display_name = profile.display_name().map(|name| name.as_str().to_owned());
        let email = profile.email().map(|email| email.as_str().to_owned());

        self.run_blocking(move |connection| {
            let updated = diesel::update(users::table.find(target.as_str()))
                .set((
                    users::display_name.eq(display_name),
                    users::email.eq(email),
                    users::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if updated == 0 {
                return Err(UserRepositoryError::NotFound(target));
            }
            Ok(())
        })
        .await
    }

    async fn update_password_hash(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
        updated_at: DateTime<Utc>,
    ) -> UserRepositoryResult<()> {
        let target = username.clone();
        let hash = password_hash.as_str().to_owned();

        self.run_blocking(move |connection| {
            let updated = diesel::update(users::table.find(target.as_str()))
                .set((
                    users::password_hash.eq(hash),
                    users::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if updated == 0 {
                return Err(UserRepositoryError::NotFound(target));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .find(lookup)
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn exists(&self, username: &Username) -> UserRepositoryResult<bool> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(users::table.find(lookup)))
                .get_result::<bool>(connection)
                .map_err(UserRepositoryError::persistence)
        })
        .await
    }
}

fn to_record(user: &User) -> UserRecord {
    UserRecord {
        username: user.username().as_str().to_owned(),
        password_hash: user.password_hash().as_str().to_owned(),
        roles: user
            .roles()
            .iter()
            .map(|role| role.as_str().to_owned())
            .collect(),
        display_name: user
            .profile()
            .display_name()
            .map(|name| name.as_str().to_owned()),
        email: user.profile().email().map(|email| email.as_str().to_owned()),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        username: persisted_username,
        password_hash,
        roles: persisted_roles,
        display_name: persisted_display_name,
        email: persisted_email,
        created_at,
        updated_at,
    } = row;

    let username = Username::new(persisted_username).map_err(UserRepositoryError::persistence)?;
    let roles = persisted_roles
        .iter()
        .map(|role| Role::try_from(role.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(UserRepositoryError::persistence)?;
    let display_name = DisplayName::parse_optional(persisted_display_name)
        .map_err(UserRepositoryError::persistence)?;
    let email =
        EmailAddress::parse_optional(persisted_email).map_err(UserRepositoryError::persistence)?;

    Ok(User::from_persisted(PersistedUserData {
        username,
        password_hash: PasswordHash::new(password_hash),
        roles,
        profile: UserProfile::new(display_name, email),
        created_at,
        updated_at,
    }))
}
