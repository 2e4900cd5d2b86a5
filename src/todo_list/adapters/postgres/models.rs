//! Diesel row models for to-do list persistence.

use super::schema::{list_tasks, todo_lists};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for list records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todo_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListRow {
    /// List identifier.
    pub id: i64,
    /// Owning username.
    pub owner: String,
    /// List title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Active flag.
    pub active: bool,
    /// Highest task identifier issued within the list.
    pub last_task_id: i64,
    /// Optimistic concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for list records; the identifier comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todo_lists)]
pub struct NewListRow {
    /// Owning username.
    pub owner: String,
    /// List title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Active flag.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the mutable list columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todo_lists)]
#[diesel(treat_none_as_null = true)]
pub struct ListChangeset {
    /// List title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Active flag.
    pub active: bool,
    /// Highest task identifier issued within the list.
    pub last_task_id: i64,
    /// Next optimistic concurrency version.
    pub version: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = list_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Owning list identifier.
    pub list_id: i64,
    /// Task identifier within the list.
    pub id: i64,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
