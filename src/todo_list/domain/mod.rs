//! Domain model for to-do lists.
//!
//! A [`ToDoList`] is the aggregate root and owns its [`Task`] collection; a
//! task cannot outlive its list. Task identifiers are issued by the list
//! itself so they stay unique within it even after removals.

mod error;
mod ids;
mod list;
mod task;
mod text;

pub use error::ListDomainError;
pub use ids::{ListId, TaskId};
pub use list::{ListChanges, NewToDoList, PersistedToDoListData, ToDoList};
pub use task::{PersistedTaskData, Task, TaskDraft};
pub use text::{Description, ListTitle, TaskName};
