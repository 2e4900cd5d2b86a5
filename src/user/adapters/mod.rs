//! Adapter implementations for user ports.

pub mod argon2;
pub mod memory;
pub mod postgres;
