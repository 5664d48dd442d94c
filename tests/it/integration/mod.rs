//! Integration tests for chatviz.
//!
//! These tests run the whole pipeline over realistic reply bodies and
//! verify the end-to-end contract: cleaned prose, model invariants, and
//! failure reporting.

mod markdown_tests;
