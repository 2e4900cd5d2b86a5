//! Unit tests for the to-do list module.

mod repository_tests;
