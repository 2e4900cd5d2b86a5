//! todo-api: an authenticated REST API for per-user to-do lists.
//!
//! Users register once and then manage their own lists and tasks over HTTP
//! Basic authentication. A list is only ever visible to its owner.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: validated value types and aggregates
//! - **Ports**: async repository traits and the password hashing contract
//! - **Adapters**: in-memory and `PostgreSQL` repositories, Argon2id hashing
//! - **Services**: owner-scoped orchestration behind service traits
//!
//! # Modules
//!
//! - [`todo_list`]: lists, tasks and the list ownership service
//! - [`user`]: accounts, credentials and authentication
//! - [`http`]: axum router, Basic-auth extractor and error mapping
//! - [`config`]: environment-driven settings for the binary
//! - [`db`]: connection pool and schema bootstrap

pub mod app;
pub mod config;
pub mod db;
pub mod http;
pub mod todo_list;
pub mod user;
pub mod validation;
