//! Adapter implementations for to-do list ports.

pub mod memory;
pub mod postgres;
