//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of panicking
//! inside Criterion closures.

use crate::source::SyntheticError;
use strand_core::StrandError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic cloud generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// A core query failed.
    #[error("strand query failed: {0}")]
    Strand(#[from] StrandError),
}
