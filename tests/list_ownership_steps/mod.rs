//! Step definitions for list ownership scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
