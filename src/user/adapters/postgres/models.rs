//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Unique username.
    pub username: String,
    /// PHC-encoded password hash.
    pub password_hash: String,
    /// Granted role names.
    pub roles: Vec<String>,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Optional email address.
    pub email: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct UserRecord {
    /// Unique username.
    pub username: String,
    /// PHC-encoded password hash.
    pub password_hash: String,
    /// Granted role names.
    pub roles: Vec<String>,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Optional email address.
    pub email: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
