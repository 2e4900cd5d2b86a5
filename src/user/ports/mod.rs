//! Port contracts for user account management.
//!
//! Ports define infrastructure-agnostic interfaces used by user services.

pub mod hasher;
pub mod repository;

pub use hasher::{HashingError, PasswordHasher};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
