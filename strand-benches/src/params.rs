//! Benchmark parameter types.

use std::fmt;

/// Parameters for a ranking benchmark run.
#[derive(Clone, Debug)]
pub struct RankingBenchParams {
    /// Number of points in the cloud.
    pub point_count: usize,
    /// Number of edges taken from the ranking, or `None` for all pairs.
    pub connections: Option<usize>,
}

impl fmt::Display for RankingBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.connections {
            Some(connections) => write!(f, "n={},take={connections}", self.point_count),
            None => write!(f, "n={},all", self.point_count),
        }
    }
}

/// Parameters for a forest consumption benchmark run.
#[derive(Clone, Debug)]
pub struct ForestBenchParams {
    /// Number of points in the cloud.
    pub point_count: usize,
}

impl fmt::Display for ForestBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.point_count)
    }
}
