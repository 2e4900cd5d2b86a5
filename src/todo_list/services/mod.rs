//! Application services for owner-scoped to-do list management.

mod ownership;

pub use ownership::{
    ListData, ListOwnershipService, TaskData, ToDoListService, ToDoListServiceError,
    ToDoListServiceResult,
};

#[cfg(test)]
pub use ownership::MockToDoListService;
