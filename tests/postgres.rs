//! `PostgreSQL` repository integration tests.
//!
//! Ignored by default. Run them with `cargo test --test postgres -- --ignored`
//! and `TODO_API_TEST_DATABASE_URL` pointing at a disposable database; a
//! missing URL fails the run. The schema is created on first use and every
//! test works under its own usernames.

use std::sync::atomic::{AtomicU32, Ordering};

use eyre::WrapErr;
use mockable::DefaultClock;
use todo_api::db::{self, DbPool};
use todo_api::todo_list::{
    adapters::postgres::PostgresToDoListRepository,
    domain::{ListChanges, ListTitle, NewToDoList, TaskDraft, TaskName},
    ports::{ToDoListRepository, ToDoListRepositoryError},
};
use todo_api::user::{
    adapters::postgres::PostgresUserRepository,
    domain::{DisplayName, EmailAddress, PasswordHash, User, UserProfile, Username},
    ports::{UserRepository, UserRepositoryError},
};

static NEXT_USER: AtomicU32 = AtomicU32::new(0);

async fn pool() -> Result<DbPool, eyre::Report> {
    let url = std::env::var("TODO_API_TEST_DATABASE_URL")
        .wrap_err("TODO_API_TEST_DATABASE_URL must name a disposable database")?;
    let pool = db::build_pool(&url, 2)?;
    db::migrate(&pool).await?;
    Ok(pool)
}

fn unique_username() -> Result<Username, eyre::Report> {
    let serial = NEXT_USER.fetch_add(1, Ordering::Relaxed);
    let nanos = chrono::Utc::now().timestamp_subsec_nanos();
    Username::new(format!("pg_{}_{nanos}_{serial}", std::process::id()))
        .map_err(|err| eyre::eyre!("generated username rejected: {err}"))
}

async fn stored_user(pool: &DbPool) -> Result<Username, eyre::Report> {
    let username = unique_username()?;
    let user = User::register(
        username.clone(),
        PasswordHash::new("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA"),
        UserProfile::default(),
        &DefaultClock,
    );
    PostgresUserRepository::new(pool.clone()).store(&user).await?;
    Ok(username)
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TODO_API_TEST_DATABASE_URL"]
async fn users_round_trip_and_reject_duplicates() -> Result<(), eyre::Report> {
    let pool = pool().await?;
    let repository = PostgresUserRepository::new(pool.clone());
    let username = stored_user(&pool).await?;

    let found = repository
        .find_by_username(&username)
        .await?
        .ok_or_else(|| eyre::eyre!("stored user not found"))?;
    eyre::ensure!(found.username() == &username, "username mismatch");
    eyre::ensure!(repository.exists(&username).await?, "exists should be true");

    let duplicate = repository.store(&found).await;
    eyre::ensure!(
        matches!(duplicate, Err(UserRepositoryError::DuplicateUsername(_))),
        "expected duplicate error, got {duplicate:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TODO_API_TEST_DATABASE_URL"]
async fn profile_and_password_writes_touch_only_their_columns() -> Result<(), eyre::Report> {
    let pool = pool().await?;
    let repository = PostgresUserRepository::new(pool.clone());
    let username = stored_user(&pool).await?;
    let profile = UserProfile::new(
        DisplayName::parse_optional(Some("Alice".to_owned()))?,
        Some(EmailAddress::new("alice@example.com")?),
    );
    let new_hash = PasswordHash::new("$argon2id$v=19$m=8,t=1,p=1$c2FsdDI$aGFzaDI");

    repository
        .update_profile(&username, &profile, chrono::Utc::now())
        .await?;
    repository
        .update_password_hash(&username, &new_hash, chrono::Utc::now())
        .await?;

    let found = repository
        .find_by_username(&username)
        .await?
        .ok_or_else(|| eyre::eyre!("stored user not found"))?;
    eyre::ensure!(found.profile() == &profile, "profile should persist");
    eyre::ensure!(found.password_hash() == &new_hash, "hash should persist");

    let missing = unique_username()?;
    let absent = repository
        .update_profile(&missing, &profile, chrono::Utc::now())
        .await;
    eyre::ensure!(
        matches!(absent, Err(UserRepositoryError::NotFound(_))),
        "expected NotFound for an unknown user, got {absent:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TODO_API_TEST_DATABASE_URL"]
async fn lists_persist_tasks_and_versions() -> Result<(), eyre::Report> {
    let pool = pool().await?;
    let owner = stored_user(&pool).await?;
    let stranger = stored_user(&pool).await?;
    let repository = PostgresToDoListRepository::new(pool);

    let created = repository
        .insert(&NewToDoList::new(
            owner.clone(),
            ListTitle::new("Groceries")?,
            &DefaultClock,
        ))
        .await?;
    let mut list = created.clone();
    list.add_task(TaskDraft::new(TaskName::new("Milk")?), &DefaultClock)?;
    list.apply(ListChanges::new().with_active(false), &DefaultClock);
    let stored = repository.update(&list).await?;
    eyre::ensure!(stored.version() == 1, "version should advance");

    let reloaded = repository
        .find_by_id_and_owner(created.id(), &owner)
        .await?
        .ok_or_else(|| eyre::eyre!("list not found for owner"))?;
    eyre::ensure!(reloaded.tasks().len() == 1, "task should persist");
    eyre::ensure!(!reloaded.is_active(), "active flag should persist");
    eyre::ensure!(reloaded.last_task_id() == 1, "task counter should persist");

    let hidden = repository
        .find_by_id_and_owner(created.id(), &stranger)
        .await?;
    eyre::ensure!(hidden.is_none(), "stranger must not see the list");

    let stale = repository.update(&list).await;
    eyre::ensure!(
        matches!(stale, Err(ToDoListRepositoryError::VersionConflict { .. })),
        "expected version conflict, got {stale:?}"
    );

    repository.delete(created.id(), &owner).await?;
    let again = repository.delete(created.id(), &owner).await;
    eyre::ensure!(
        matches!(again, Err(ToDoListRepositoryError::NotFound(_))),
        "expected NotFound on second delete, got {again:?}"
    );
    Ok(())
}
