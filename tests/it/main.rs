//! Single test binary entry point.
//!
//! This consolidates all tests into a single binary following matklad's best practices,
//! reducing linking overhead from 3x to 1x.
//!
//! Structure:
//! - unit: Single-stage tests (scanner, shapes, sanitization, payloads)
//! - integration: Full pipeline runs over realistic reply bodies

mod helpers;
mod integration;
mod unit;
