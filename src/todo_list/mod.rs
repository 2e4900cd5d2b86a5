//! Per-user to-do lists and their tasks.
//!
//! Every read and mutation of a list is scoped to the authenticated owner;
//! lists owned by someone else are indistinguishable from lists that do not
//! exist. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
