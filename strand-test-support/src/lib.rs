//! Shared test utilities used across strand crates.

pub mod ci;
pub mod tracing;
