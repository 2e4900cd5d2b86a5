//! User identity and credential management.
//!
//! Users register with a username and password, may update their profile and
//! change their password, and are looked up by the HTTP layer to authenticate
//! each request. The module follows hexagonal architecture:
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
