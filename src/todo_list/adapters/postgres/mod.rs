//! `PostgreSQL` adapters for to-do list persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresToDoListRepository;
