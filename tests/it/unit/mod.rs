//! Unit tests for chatviz.

mod sanitize_tests;
mod scanner_tests;
mod snapshot_tests;
