//! Seeded synthetic point clouds for benchmarking.
//!
//! Coordinates are drawn uniformly from `0..extent` on every axis, so a small
//! extent relative to the point count produces many duplicate distances.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use strand_core::{Point, PointStore};

/// Errors that may occur during synthetic cloud generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested coordinate extent was zero.
    #[error("coordinate extent must be greater than zero")]
    ZeroExtent,
}

/// Configuration for synthetic cloud generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Exclusive upper bound of every coordinate.
    pub extent: u32,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates a uniformly distributed point cloud.
///
/// # Errors
/// Returns [`SyntheticError::ZeroPoints`] if `point_count` is zero, or
/// [`SyntheticError::ZeroExtent`] if `extent` is zero.
///
/// # Examples
/// ```
/// use strand_benches::source::{SyntheticConfig, generate};
///
/// let config = SyntheticConfig { point_count: 10, extent: 1_000, seed: 42 };
/// let store = generate(&config).expect("valid config");
/// assert_eq!(store.len(), 10);
/// assert!(store.iter().all(|point| point.x() < 1_000));
/// ```
pub fn generate(config: &SyntheticConfig) -> Result<PointStore, SyntheticError> {
    if config.point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    if config.extent == 0 {
        return Err(SyntheticError::ZeroExtent);
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let points = (0..config.point_count)
        .map(|_| {
            Point::new(
                rng.gen_range(0..config.extent),
                rng.gen_range(0..config.extent),
                rng.gen_range(0..config.extent),
            )
        })
        .collect();
    Ok(PointStore::new(
        format!("synthetic-{}-{}", config.point_count, config.seed),
        points,
    ))
}
