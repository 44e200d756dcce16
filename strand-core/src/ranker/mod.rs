//! Ranking of proximity edges harvested from the spatial index.
//!
//! Every neighbour observation `(i, j)` becomes an undirected [`Edge`] in
//! canonical `source < target` form. Observations of the same pair from both
//! endpoints carry identical distances, so sorting by
//! `(squared distance, source, target)` places them side by side and a single
//! `dedup` pass collapses them.

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::index::{Neighbour, SpatialIndex};

/// An undirected proximity edge in canonical form (`source < target`).
///
/// Edges order by `(squared distance, source, target)`, which is total and
/// therefore makes every ranking deterministic.
///
/// # Examples
/// ```
/// use strand_core::Edge;
///
/// let edge = Edge::new(5, 2, 9);
/// assert_eq!(edge.source(), 2);
/// assert_eq!(edge.target(), 5);
/// assert_eq!(edge.squared_distance(), 9);
/// assert!((edge.distance() - 3.0).abs() < f64::EPSILON);
/// assert!(Edge::new(0, 1, 4) < Edge::new(0, 2, 4));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    source: usize,
    target: usize,
    squared_distance: u128,
}

impl Edge {
    /// Creates an edge between `left` and `right`, canonicalising the
    /// endpoint order.
    #[must_use]
    pub const fn new(left: usize, right: usize, squared_distance: u128) -> Self {
        let (source, target) = if left <= right {
            (left, right)
        } else {
            (right, left)
        };
        Self {
            source,
            target,
            squared_distance,
        }
    }

    /// Returns the smaller endpoint index.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Returns the larger endpoint index.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> usize { self.target }

    /// Returns both endpoints as `(source, target)`.
    #[must_use]
    pub const fn endpoints(&self) -> (usize, usize) {
        (self.source, self.target)
    }

    /// Returns the exact squared Euclidean length.
    #[must_use]
    #[rustfmt::skip]
    pub const fn squared_distance(&self) -> u128 { self.squared_distance }

    /// Returns the Euclidean length.
    #[must_use]
    pub fn distance(&self) -> f64 {
        (self.squared_distance as f64).sqrt()
    }

    fn same_pair(&self, other: &Self) -> bool {
        self.source == other.source && self.target == other.target
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.squared_distance
            .cmp(&other.squared_distance)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Deduplicated edges in non-decreasing distance order.
///
/// # Examples
/// ```
/// use strand_core::{Edge, RankedEdges};
///
/// let ranked = RankedEdges::from_unsorted(vec![
///     Edge::new(1, 2, 2),
///     Edge::new(0, 1, 1),
///     Edge::new(1, 0, 1),
/// ]);
/// assert_eq!(ranked.len(), 2);
/// assert_eq!(ranked.as_slice()[0], Edge::new(0, 1, 1));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankedEdges(Vec<Edge>);

impl RankedEdges {
    /// Sorts `edges` and removes repeated observations of the same pair.
    #[must_use]
    pub fn from_unsorted(mut edges: Vec<Edge>) -> Self {
        sort_edges(&mut edges);
        edges.dedup_by(|later, earlier| later.same_pair(earlier));
        Self(edges)
    }

    /// Returns the number of ranked edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.0.len() }

    /// Returns whether no edges were ranked.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an iterator over the edges in rank order.
    #[rustfmt::skip]
    pub fn iter(&self) -> impl Iterator<Item = &Edge> { self.0.iter() }

    /// Returns the edges in rank order.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[Edge] { &self.0 }

    /// Returns the `n` shortest edges, or all of them when fewer exist.
    #[must_use]
    pub fn prefix(&self, n: usize) -> &[Edge] {
        &self.0[..n.min(self.0.len())]
    }

    /// Keeps only the `n` shortest edges.
    pub fn truncate(&mut self, n: usize) {
        self.0.truncate(n);
    }

    /// Consumes the ranking and returns the underlying edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn into_inner(self) -> Vec<Edge> { self.0 }

    /// Returns an iterator over overlapping windows of edges.
    ///
    /// Used for verifying sort order invariants.
    pub fn windows(&self, size: usize) -> impl Iterator<Item = &[Edge]> {
        self.0.windows(size)
    }
}

impl IntoIterator for RankedEdges {
    type Item = Edge;
    type IntoIter = std::vec::IntoIter<Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedEdges {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(feature = "parallel")]
fn sort_edges(edges: &mut [Edge]) {
    edges.par_sort_unstable();
}

#[cfg(not(feature = "parallel"))]
fn sort_edges(edges: &mut [Edge]) {
    edges.sort_unstable();
}

/// Converts neighbour queries into a globally ranked edge sequence.
///
/// # Examples
/// ```
/// use strand_core::{EdgeRanker, Point, PointStore, SpatialIndex};
///
/// let store = PointStore::new("triangle", vec![
///     Point::new(0, 0, 0),
///     Point::new(1, 0, 0),
///     Point::new(0, 1, 0),
/// ]);
/// let index = SpatialIndex::build(&store);
/// let ranker = EdgeRanker::new(&index);
/// let ranked = ranker.rank_edges();
/// assert_eq!(ranked.len(), 3);
/// assert_eq!(ranker.take(2).len(), 2);
/// assert_eq!(ranker.take(99).len(), 3);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EdgeRanker<'i, 'a> {
    index: &'i SpatialIndex<'a>,
}

impl<'i, 'a> EdgeRanker<'i, 'a> {
    /// Creates a ranker over `index`.
    #[must_use]
    pub const fn new(index: &'i SpatialIndex<'a>) -> Self {
        Self { index }
    }

    /// Returns every unique pair of points in non-decreasing distance order.
    #[must_use]
    #[instrument(name = "ranker.rank", skip(self), fields(points = self.index.len()))]
    pub fn rank_edges(&self) -> RankedEdges {
        let table = self.index.query_all_pairs();
        let ranked = harvest(&table, true);
        debug!(edges = ranked.len(), "ranked all pairs");
        ranked
    }

    /// Returns the `n` shortest edges, or every edge when fewer than `n`
    /// exist.
    ///
    /// Each point only contributes its `min(n, N - 1)` nearest neighbours:
    /// an edge among the global `n` shortest has fewer than `n` shorter
    /// edges in total, hence fewer than `n` at either endpoint under the
    /// same `(distance, index)` order. The result equals truncating
    /// [`Self::rank_edges`].
    #[must_use]
    #[instrument(name = "ranker.take", skip(self), fields(points = self.index.len()))]
    pub fn take(&self, n: usize) -> RankedEdges {
        let available = self.index.len().saturating_sub(1);
        let k = n.min(available);
        let table = self.index.query_neighbours(k);
        let mut ranked = harvest(&table, k == available);
        ranked.truncate(n);
        debug!(edges = ranked.len(), neighbours = k, "ranked edge prefix");
        ranked
    }
}

/// Builds a ranking from a neighbour table.
///
/// When every row is complete each pair is observed from both ends, so only
/// the `source < target` observation is kept before sorting.
fn harvest(table: &[Vec<Neighbour>], complete: bool) -> RankedEdges {
    let capacity: usize = table.iter().map(Vec::len).sum();
    let mut edges = Vec::with_capacity(if complete { capacity / 2 } else { capacity });
    for (query, neighbours) in table.iter().enumerate() {
        edges.extend(
            neighbours
                .iter()
                .filter(|neighbour| !complete || neighbour.id() > query)
                .map(|neighbour| Edge::new(query, neighbour.id(), neighbour.squared_distance())),
        );
    }
    RankedEdges::from_unsorted(edges)
}
