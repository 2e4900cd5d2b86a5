//! Request and response bodies.
//!
//! Response bodies never carry password material.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::todo_list::domain::{Description, Task, ToDoList};
use crate::todo_list::services::{ListData, TaskData};
use crate::user::domain::UserView;

/// Body of list creation and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    /// List title; required on creation.
    pub title: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Active flag.
    pub active: Option<bool>,
}

impl From<ListRequest> for ListData {
    fn from(request: ListRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            active: request.active,
        }
    }
}

/// Body of the add-task request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Task name; required.
    pub name: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: Option<bool>,
}

impl From<TaskRequest> for TaskData {
    fn from(request: TaskRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            completed: request.completed,
        }
    }
}

/// A task as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Identifier within the owning list.
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

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().value(),
            name: task.name().as_str().to_owned(),
            description: task.description().map(|text| text.as_str().to_owned()),
            completed: task.is_completed(),
            created_at: task.created_at(),
        }
    }
}

/// A to-do list as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    /// List identifier.
    pub id: i64,
    /// Owning username.
    pub owner: String,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Active flag.
    pub active: bool,
    /// Tasks ordered by identifier.
    pub tasks: Vec<TaskResponse>,
    /// Optimistic concurrency version.
    pub version: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&ToDoList> for ListResponse {
    fn from(list: &ToDoList) -> Self {
        Self {
            id: list.id().value(),
            owner: list.owner().as_str().to_owned(),
            title: list.title().as_str().to_owned(),
            description: list.description().map(Description::to_string),
            active: list.is_active(),
            tasks: list.tasks().iter().map(TaskResponse::from).collect(),
            version: list.version(),
            created_at: list.created_at(),
            updated_at: list.updated_at(),
        }
    }
}

/// Body of the registration request.
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    /// Requested username.
    pub username: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Optional email address.
    pub email: Option<String>,
}

/// Body of the profile update request; absent fields are cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRequest {
    /// Display name.
    pub display_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

/// Body of the password change request.
#[derive(Clone, Deserialize)]
pub struct PasswordChangeRequest {
    /// New plaintext password.
    pub password: String,
}

/// Public view of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// Username.
    pub username: String,
    /// Granted roles.
    pub roles: Vec<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<UserView> for UserResponse {
    fn from(view: UserView) -> Self {
        Self {
            username: view.username.as_str().to_owned(),
            roles: view.roles.iter().map(ToString::to_string).collect(),
            display_name: view.profile.display_name().map(|name| name.as_str().to_owned()),
            email: view.profile.email().map(|email| email.as_str().to_owned()),
            created_at: view.created_at,
        }
    }
}

/// Health check response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: String,
}
