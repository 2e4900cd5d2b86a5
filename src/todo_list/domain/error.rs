//! Error types for to-do list domain validation.

use super::{ListId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating to-do list values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListDomainError {
    /// The list title is missing or empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The list title exceeds its storage limit.
    #[error("title exceeds {0} character limit")]
    TitleTooLong(usize),

    /// The task name is missing or empty after trimming.
    #[error("name must not be empty")]
    EmptyTaskName,

    /// The task name exceeds its storage limit.
    #[error("name exceeds {0} character limit")]
    TaskNameTooLong(usize),

    /// A description exceeds its storage limit.
    #[error("description exceeds {0} character limit")]
    DescriptionTooLong(usize),

    /// The list does not contain the requested task.
    #[error("to-do list {list_id} does not contain task {task_id}")]
    TaskNotFound {
        /// List that was searched.
        list_id: ListId,
        /// Task that was not found.
        task_id: TaskId,
    },

    /// The list has issued every representable task identifier.
    #[error("to-do list {0} cannot issue further task identifiers")]
    TaskIdsExhausted(ListId),
}
