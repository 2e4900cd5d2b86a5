//! To-do list aggregate root.

use super::{Description, ListDomainError, ListId, ListTitle, Task, TaskDraft, TaskId};
use crate::user::domain::Username;
use chrono::{DateTime, Utc};
use mockable::Clock;

/// A validated list that has not been persisted yet.
///
/// Persistence assigns the [`ListId`] and turns it into a [`ToDoList`] via
/// [`ToDoList::from_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToDoList {
    owner: Username,
    title: ListTitle,
    description: Option<Description>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl NewToDoList {
    /// Creates an active list owned by `owner`.
    #[must_use]
    pub fn new(owner: Username, title: ListTitle, clock: &impl Clock) -> Self {
        Self {
            owner,
            title,
            description: None,
            active: true,
            created_at: clock.utc(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<Description>) -> Self {
        self.description = description;
        self
    }

    /// Sets the initial active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns the owner.
    #[must_use]
    pub const fn owner(&self) -> &Username {
        &self.owner
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &ListTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Returns the initial active flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Mutable fields of a list; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListChanges {
    title: Option<ListTitle>,
    description: Option<Option<Description>>,
    active: Option<bool>,
}

impl ListChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: ListTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the description; `None` clears it.
    #[must_use]
    pub fn with_description(mut self, description: Option<Description>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces the active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// To-do list aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToDoList {
    id: ListId,
    owner: Username,
    title: ListTitle,
    description: Option<Description>,
    active: bool,
    tasks: Vec<Task>,
    last_task_id: i64,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted list aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedToDoListData {
    /// Persisted list identifier.
    pub id: ListId,
    /// Persisted owner.
    pub owner: Username,
    /// Persisted title.
    pub title: ListTitle,
    /// Persisted description, if any.
    pub description: Option<Description>,
    /// Persisted active flag.
    pub active: bool,
    /// Persisted tasks ordered by identifier.
    pub tasks: Vec<Task>,
    /// Highest task identifier ever issued by the list.
    pub last_task_id: i64,
    /// Persisted version counter.
    pub version: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ToDoList {
    /// Materialises a freshly inserted list under its assigned identifier.
    #[must_use]
    pub fn from_new(id: ListId, list: &NewToDoList) -> Self {
        Self {
            id,
            owner: list.owner.clone(),
            title: list.title.clone(),
            description: list.description.clone(),
            active: list.active,
            tasks: Vec::new(),
            last_task_id: 0,
            version: 0,
            created_at: list.created_at,
            updated_at: list.created_at,
        }
    }

    /// Reconstructs a list from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedToDoListData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            description: data.description,
            active: data.active,
            tasks: data.tasks,
            last_task_id: data.last_task_id,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the owner.
    #[must_use]
    pub const fn owner(&self) -> &Username {
        &self.owner
    }

    /// Returns `true` when `username` owns this list.
    #[must_use]
    pub fn is_owned_by(&self, username: &Username) -> bool {
        &self.owner == username
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &ListTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Returns the active flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the highest task identifier ever issued by this list.
    #[must_use]
    pub const fn last_task_id(&self) -> i64 {
        self.last_task_id
    }

    /// Returns the optimistic concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies the fields present in `changes`.
    ///
    /// The identifier, owner and creation timestamp never change.
    pub fn apply(&mut self, changes: ListChanges, clock: &impl Clock) {
        let ListChanges {
            title,
            description,
            active,
        } = changes;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_active) = active {
            self.active = new_active;
        }
        self.touch(clock);
    }

    /// Sets the active flag.
    ///
    /// Returns `false` without touching the list when the flag already has
    /// the requested value.
    pub fn set_active(&mut self, active: bool, clock: &impl Clock) -> bool {
        if self.active == active {
            return false;
        }
        self.active = active;
        self.touch(clock);
        true
    }

    /// Appends a task under the next unused identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ListDomainError::TaskIdsExhausted`] when no further
    /// identifier can be issued.
    pub fn add_task(&mut self, draft: TaskDraft, clock: &impl Clock) -> Result<TaskId, ListDomainError> {
        let next = self
            .last_task_id
            .checked_add(1)
            .ok_or(ListDomainError::TaskIdsExhausted(self.id))?;
        let task_id = TaskId::new(next);
        let timestamp = clock.utc();

        self.tasks.push(Task::from_draft(task_id, draft, timestamp));
        self.last_task_id = next;
        self.updated_at = timestamp;
        Ok(task_id)
    }

    /// Removes and returns the task with `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ListDomainError::TaskNotFound`] when the list does not
    /// contain the task; the collection is left unchanged.
    pub fn remove_task(&mut self, task_id: TaskId, clock: &impl Clock) -> Result<Task, ListDomainError> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id() == task_id)
            .ok_or(ListDomainError::TaskNotFound {
                list_id: self.id,
                task_id,
            })?;
        let removed = self.tasks.remove(position);
        self.touch(clock);
        Ok(removed)
    }

    /// Records that a write of this state was accepted by persistence.
    pub(crate) const fn advance_version(&mut self) {
        self.version = self.version.saturating_add(1);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
