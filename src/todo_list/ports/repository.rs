//! Repository port for owner-scoped to-do list persistence.

use crate::todo_list::domain::{ListId, NewToDoList, ToDoList};
use crate::user::domain::Username;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for to-do list repository operations.
pub type ToDoListRepositoryResult<T> = Result<T, ToDoListRepositoryError>;

/// To-do list persistence contract.
///
/// Lookups and deletes take the owner so implementations never hand a list
/// to anyone but its owner.
#[async_trait]
pub trait ToDoListRepository: Send + Sync {
    /// Inserts a new list and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ToDoListRepositoryError::Persistence`] when storage fails.
    async fn insert(&self, list: &NewToDoList) -> ToDoListRepositoryResult<ToDoList>;

    /// Persists every field and the full task collection of an existing list.
    ///
    /// Returns the stored list with its version advanced.
    ///
    /// # Errors
    ///
    /// Returns [`ToDoListRepositoryError::NotFound`] when the list no longer
    /// exists, or [`ToDoListRepositoryError::VersionConflict`] when it was
    /// written since `list` was loaded.
    async fn update(&self, list: &ToDoList) -> ToDoListRepositoryResult<ToDoList>;

    /// Finds a list by identifier, provided `owner` owns it.
    ///
    /// Returns `None` when the list does not exist or belongs to someone else.
    async fn find_by_id_and_owner(
        &self,
        id: ListId,
        owner: &Username,
    ) -> ToDoListRepositoryResult<Option<ToDoList>>;

    /// Returns every list owned by `owner`, ordered by identifier.
    async fn find_all_by_owner(&self, owner: &Username) -> ToDoListRepositoryResult<Vec<ToDoList>>;

    /// Deletes a list owned by `owner` together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ToDoListRepositoryError::NotFound`] when no such list is
    /// owned by `owner`.
    async fn delete(&self, id: ListId, owner: &Username) -> ToDoListRepositoryResult<()>;
}

/// Errors returned by to-do list repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ToDoListRepositoryError {
    /// The list was not found.
    #[error("to-do list not found: {0}")]
    NotFound(ListId),

    /// The list was modified after it was loaded.
    #[error("to-do list {id} was modified concurrently (expected version {expected})")]
    VersionConflict {
        /// List identifier.
        id: ListId,
        /// Version the writer loaded.
        expected: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ToDoListRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
