//! List ownership service: every read and write is scoped to the caller.

use crate::todo_list::{
    domain::{
        Description, ListChanges, ListDomainError, ListId, ListTitle, NewToDoList, TaskDraft,
        TaskId, TaskName, ToDoList,
    },
    ports::{ToDoListRepository, ToDoListRepositoryError},
};
use crate::user::domain::Username;
use crate::validation::ValidationErrors;
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Client-supplied list fields.
///
/// On creation `title` is required and a missing `active` defaults to
/// `true`. On update only the fields that are present are applied; a blank
/// description clears the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListData {
    /// List title.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Active flag.
    pub active: Option<bool>,
}

impl ListData {
    /// Creates list data carrying only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Client-supplied task fields; `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskData {
    /// Task name.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Completion flag, `false` when absent.
    pub completed: Option<bool>,
}

impl TaskData {
    /// Creates task data carrying only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

/// Service-level errors for to-do list operations.
#[derive(Debug, Error)]
pub enum ToDoListServiceError {
    /// The list does not exist or is owned by someone else.
    #[error("to-do list {0} not found")]
    NotFound(ListId),

    /// The list does not contain the task.
    #[error("to-do list {list_id} does not contain task {task_id}")]
    TaskNotFound {
        /// List that was searched.
        list_id: ListId,
        /// Task that was not found.
        task_id: TaskId,
    },

    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Another request modified the list first.
    #[error("to-do list {0} was modified concurrently; reload and retry")]
    Conflict(ListId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(ToDoListRepositoryError),
}

impl From<ToDoListRepositoryError> for ToDoListServiceError {
    fn from(err: ToDoListRepositoryError) -> Self {
        match err {
            ToDoListRepositoryError::NotFound(id) => Self::NotFound(id),
            ToDoListRepositoryError::VersionConflict { id, .. } => Self::Conflict(id),
            ToDoListRepositoryError::Persistence(_) => Self::Repository(err),
        }
    }
}

impl From<ListDomainError> for ToDoListServiceError {
    fn from(err: ListDomainError) -> Self {
        let field = match &err {
            ListDomainError::TaskNotFound { list_id, task_id } => {
                return Self::TaskNotFound {
                    list_id: *list_id,
                    task_id: *task_id,
                };
            }
            ListDomainError::EmptyTitle | ListDomainError::TitleTooLong(_) => "title",
            ListDomainError::EmptyTaskName | ListDomainError::TaskNameTooLong(_) => "name",
            ListDomainError::DescriptionTooLong(_) => "description",
            ListDomainError::TaskIdsExhausted(_) => "tasks",
        };
        Self::Validation(ValidationErrors::single(field, err.to_string()))
    }
}

/// Result type for to-do list service operations.
pub type ToDoListServiceResult<T> = Result<T, ToDoListServiceError>;

/// Owner-scoped to-do list operations consumed by the transport layer.
///
/// A list owned by another user is reported exactly like a missing one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToDoListService: Send + Sync {
    /// Returns the list with `id` when `username` owns it.
    ///
    /// # Errors
    ///
    /// Returns [`ToDoListServiceError::NotFound`] when the list is absent or
    /// owned by someone else.
    async fn get_list_by_id_for_user(
        &self,
        id: ListId,
        username: &Username,
    ) -> ToDoListServiceResult<ToDoList>;

    /// Returns every list owned by `username`, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ToDoListServiceError::Repository`] when storage fails.
    async fn list_all_for_user(&self, username: &Username) -> ToDoListServiceResult<Vec<ToDoList>>;

    /// Creates a list owned by `username`.
    ///
    /// # Errors
    ///
    /// Returns [`ToDoListServiceError::Validation`] when the title is missing
    /// or a field is invalid.
    async fn create_list(
        &self,
        data: ListData,
        username: &Username,
    ) -> ToDoListServiceResult<ToDoList>;

    /// Applies the present fields of `data` to an owned list.
    ///
    /// # Errors
    ///
    /// Returns [`ToDoListServiceError::NotFound`],
    /// [`ToDoListServiceError::Validation`] or
    /// [`ToDoListServiceError::Conflict`].
    async fn update_list(
        &self,
        id: ListId,
        data: ListData,
        username: &Username,
    ) -> ToDoListServiceResult<ToDoList>;

    /// Deletes an owned list together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ToDoListServiceError::NotFound`] when the list is absent or
    /// owned by someone else.
    async fn delete_list(&self, id: ListId, username: &Username) -> ToDoListServiceResult<()>;

    /// Sets the active flag of an owned list.
    ///
    /// # Errors
    ///
    /// Returns [`ToDoListServiceError::NotFound`] or
    /// [`ToDoListServiceError::Conflict`].
    async fn set_active(
        &self,
        id: ListId,
        username: &Username,
        active: bool,
    ) -> ToDoListServiceResult<ToDoList>;

    /// Appends a task to an owned list and returns the updated list.
    ///
    /// # Errors
    ///
    /// Returns [`ToDoListServiceError::NotFound`],
    /// [`ToDoListServiceError::Validation`] or
    /// [`ToDoListServiceError::Conflict`].
    async fn add_task(
        &self,
        id: ListId,
        username: &Username,
        data: TaskData,
    ) -> ToDoListServiceResult<ToDoList>;

    /// Removes a task from an owned list and returns the updated list.
    ///
    /// # Errors
    ///
    /// Returns [`ToDoListServiceError::NotFound`] for the list,
    /// [`ToDoListServiceError::TaskNotFound`] for the task, or
    /// [`ToDoListServiceError::Conflict`].
    async fn remove_task(
        &self,
        list_id: ListId,
        username: &Username,
        task_id: TaskId,
    ) -> ToDoListServiceResult<ToDoList>;
}

/// Repository-backed implementation of [`ToDoListService`].
#[derive(Clone)]
pub struct ListOwnershipService<R, C>
where
    R: ToDoListRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ListOwnershipService<R, C>
where
    R: ToDoListRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new list ownership service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    async fn require_owned(&self, id: ListId, username: &Username) -> ToDoListServiceResult<ToDoList> {
        self.repository
            .find_by_id_and_owner(id, username)
            .await?
            .ok_or(ToDoListServiceError::NotFound(id))
    }
}

fn parse_replacement_description(
    value: Option<String>,
) -> Result<Option<Option<Description>>, ListDomainError> {
    value
        .map(|raw| Description::parse_optional(Some(raw)))
        .transpose()
}

#[async_trait]
impl<R, C> ToDoListService for ListOwnershipService<R, C>
where
    R: ToDoListRepository,
    C: Clock + Send + Sync,
{
    async fn get_list_by_id_for_user(
        &self,
        id: ListId,
        username: &Username,
    ) -> ToDoListServiceResult<ToDoList> {
        let list = self.require_owned(id, username).await?;
        debug!(list_id = %id, %username, "loaded to-do list");
        Ok(list)
    }

    async fn list_all_for_user(&self, username: &Username) -> ToDoListServiceResult<Vec<ToDoList>> {
        let lists = self.repository.find_all_by_owner(username).await?;
        debug!(%username, count = lists.len(), "listed to-do lists");
        Ok(lists)
    }

    async fn create_list(
        &self,
        data: ListData,
        username: &Username,
    ) -> ToDoListServiceResult<ToDoList> {
        let ListData {
            title,
            description,
            active,
        } = data;

        let mut errors = ValidationErrors::new();
        let valid_title = errors.check("title", ListTitle::required(title));
        let valid_description = errors.check("description", Description::parse_optional(description));
        let (Some(list_title), Some(list_description)) = (valid_title, valid_description) else {
            return Err(errors.into());
        };

        let new_list = NewToDoList::new(username.clone(), list_title, &*self.clock)
            .with_description(list_description)
            .with_active(active.unwrap_or(true));
        let created = self.repository.insert(&new_list).await?;

        info!(list_id = %created.id(), %username, "created to-do list");
        Ok(created)
    }

    async fn update_list(
        &self,
        id: ListId,
        data: ListData,
        username: &Username,
    ) -> ToDoListServiceResult<ToDoList> {
        let ListData {
            title,
            description,
            active,
        } = data;

        let mut errors = ValidationErrors::new();
        let valid_title = errors.check("title", title.map(ListTitle::new).transpose());
        let valid_description =
            errors.check("description", parse_replacement_description(description));
        let (Some(new_title), Some(new_description)) = (valid_title, valid_description) else {
            return Err(errors.into());
        };

        let mut changes = ListChanges::new();
        if let Some(replacement) = new_title {
            changes = changes.with_title(replacement);
        }
        if let Some(replacement) = new_description {
            changes = changes.with_description(replacement);
        }
        if let Some(flag) = active {
            changes = changes.with_active(flag);
        }

        let mut list = self.require_owned(id, username).await?;
        list.apply(changes, &*self.clock);
        let updated = self.repository.update(&list).await?;

        info!(list_id = %id, %username, version = updated.version(), "updated to-do list");
        Ok(updated)
    }

    async fn delete_list(&self, id: ListId, username: &Username) -> ToDoListServiceResult<()> {
        let list = self.require_owned(id, username).await?;
        self.repository.delete(list.id(), username).await?;

        info!(list_id = %id, %username, tasks = list.tasks().len(), "deleted to-do list");
        Ok(())
    }

    async fn set_active(
        &self,
        id: ListId,
        username: &Username,
        active: bool,
    ) -> ToDoListServiceResult<ToDoList> {
        let mut list = self.require_owned(id, username).await?;
        if !list.set_active(active, &*self.clock) {
            debug!(list_id = %id, active, "active flag already set");
            return Ok(list);
        }
        let updated = self.repository.update(&list).await?;

        info!(list_id = %id, %username, active, "changed active flag");
        Ok(updated)
    }

    async fn add_task(
        &self,
        id: ListId,
        username: &Username,
        data: TaskData,
    ) -> ToDoListServiceResult<ToDoList> {
        let TaskData {
            name,
            description,
            completed,
        } = data;

        let mut errors = ValidationErrors::new();
        let valid_name = errors.check("name", TaskName::required(name));
        let valid_description = errors.check("description", Description::parse_optional(description));
        let (Some(task_name), Some(task_description)) = (valid_name, valid_description) else {
            return Err(errors.into());
        };
        let draft = TaskDraft::new(task_name)
            .with_description(task_description)
            .with_completed(completed.unwrap_or(false));

        let mut list = self.require_owned(id, username).await?;
        let task_id = list.add_task(draft, &*self.clock)?;
        let updated = self.repository.update(&list).await?;

        info!(list_id = %id, %task_id, %username, "added task");
        Ok(updated)
    }

    async fn remove_task(
        &self,
        list_id: ListId,
        username: &Username,
        task_id: TaskId,
    ) -> ToDoListServiceResult<ToDoList> {
        let mut list = self.require_owned(list_id, username).await?;
        list.remove_task(task_id, &*self.clock)?;
        let updated = self.repository.update(&list).await?;

        info!(%list_id, %task_id, %username, "removed task");
        Ok(updated)
    }
}
