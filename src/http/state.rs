//! Shared handler state.

use crate::todo_list::services::ToDoListService;
use crate::user::services::UserService;
use std::sync::Arc;

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Owner-scoped list operations.
    pub lists: Arc<dyn ToDoListService>,
    /// Account operations and authentication.
    pub users: Arc<dyn UserService>,
}

impl AppState {
    /// Bundles the services consumed by the router.
    #[must_use]
    pub const fn new(lists: Arc<dyn ToDoListService>, users: Arc<dyn UserService>) -> Self {
        Self { lists, users }
    }
}
