//! Shared world state for list ownership BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use todo_api::todo_list::{
    adapters::memory::InMemoryToDoListRepository,
    domain::ToDoList,
    services::{ListOwnershipService, ToDoListServiceError},
};
use todo_api::user::domain::Username;

/// Service type used by the BDD world.
pub type TestListService = ListOwnershipService<InMemoryToDoListRepository, DefaultClock>;

/// Scenario world for list ownership behaviour tests.
pub struct ListOwnershipWorld {
    pub service: TestListService,
    pub current_list: Option<ToDoList>,
    pub last_error: Option<ToDoListServiceError>,
}

impl ListOwnershipWorld {
    /// Creates a world with no lists.
    #[must_use]
    pub fn new() -> Self {
        let service = ListOwnershipService::new(
            Arc::new(InMemoryToDoListRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            current_list: None,
            last_error: None,
        }
    }

    /// Returns the list the scenario is working on.
    ///
    /// # Errors
    ///
    /// Returns an error when no list has been created yet.
    pub fn list(&self) -> Result<&ToDoList, eyre::Report> {
        self.current_list
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing current list in scenario world"))
    }

    /// Records the outcome of a list-returning operation.
    pub fn record(&mut self, result: Result<ToDoList, ToDoListServiceError>) {
        match result {
            Ok(list) => {
                self.current_list = Some(list);
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
    }
}

impl Default for ListOwnershipWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ListOwnershipWorld {
    ListOwnershipWorld::default()
}

/// Parses a username used in a step.
///
/// # Errors
///
/// Returns an error when the step text holds an invalid username.
pub fn username(raw: &str) -> Result<Username, eyre::Report> {
    Username::new(raw).map_err(|err| eyre::eyre!("invalid username {raw:?} in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
