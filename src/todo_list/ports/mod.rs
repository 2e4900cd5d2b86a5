//! Port contracts for to-do list persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by list services.

pub mod repository;

pub use repository::{ToDoListRepository, ToDoListRepositoryError, ToDoListRepositoryResult};
