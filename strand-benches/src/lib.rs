//! Benchmark support crate for strand.
//!
//! Provides seeded synthetic point clouds and parameter types used by the
//! Criterion benchmarks for edge ranking and component consumption.

pub mod error;
pub mod params;
pub mod source;
