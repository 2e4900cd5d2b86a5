//! Validated text fields of lists and tasks.

use super::ListDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted list title, matching the `VARCHAR(100)` column.
const MAX_TITLE_LENGTH: usize = 100;

/// Longest accepted task name, matching the `VARCHAR(100)` column.
const MAX_TASK_NAME_LENGTH: usize = 100;

/// Longest accepted description, matching the `VARCHAR(1000)` columns.
const MAX_DESCRIPTION_LENGTH: usize = 1000;

fn required_text(
    value: &str,
    max: usize,
    empty: ListDomainError,
    too_long: ListDomainError,
) -> Result<String, ListDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > max {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

/// Non-empty title of a to-do list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListTitle(String);

impl ListTitle {
    /// Creates a validated list title.
    ///
    /// # Errors
    ///
    /// Returns [`ListDomainError::EmptyTitle`] when the trimmed value is
    /// empty or [`ListDomainError::TitleTooLong`] when it exceeds 100
    /// characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ListDomainError> {
        required_text(
            value.as_ref(),
            MAX_TITLE_LENGTH,
            ListDomainError::EmptyTitle,
            ListDomainError::TitleTooLong(MAX_TITLE_LENGTH),
        )
        .map(Self)
    }

    /// Validates a title that may be missing from the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ListDomainError::EmptyTitle`] when `value` is `None`, or any
    /// error of [`ListTitle::new`].
    pub fn required(value: Option<String>) -> Result<Self, ListDomainError> {
        value.map_or(Err(ListDomainError::EmptyTitle), Self::new)
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-empty name of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`ListDomainError::EmptyTaskName`] when the trimmed value is
    /// empty or [`ListDomainError::TaskNameTooLong`] when it exceeds 100
    /// characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ListDomainError> {
        required_text(
            value.as_ref(),
            MAX_TASK_NAME_LENGTH,
            ListDomainError::EmptyTaskName,
            ListDomainError::TaskNameTooLong(MAX_TASK_NAME_LENGTH),
        )
        .map(Self)
    }

    /// Validates a name that may be missing from the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ListDomainError::EmptyTaskName`] when `value` is `None`, or
    /// any error of [`TaskName::new`].
    pub fn required(value: Option<String>) -> Result<Self, ListDomainError> {
        value.map_or(Err(ListDomainError::EmptyTaskName), Self::new)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form description of a list or task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Parses an optional description; blank input yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ListDomainError::DescriptionTooLong`] when the trimmed value
    /// exceeds 1000 characters.
    pub fn parse_optional(value: Option<String>) -> Result<Option<Self>, ListDomainError> {
        let Some(raw) = value else {
            return Ok(None);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ListDomainError::DescriptionTooLong(MAX_DESCRIPTION_LENGTH));
        }
        Ok(Some(Self(trimmed.to_owned())))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
