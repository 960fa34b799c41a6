//! CLI integration tests.

mod common;
mod diff_tests;
mod pending_tests;
mod update_tests;
