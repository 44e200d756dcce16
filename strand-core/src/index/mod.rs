//! Spatial index answering nearest-neighbour queries over a [`PointStore`].
//!
//! The index is built once and is read-only afterwards, so per-point queries
//! run in parallel when the `parallel` feature is enabled and the caller asks
//! for it. Sequential and parallel queries return identical tables.

mod kdtree;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::point::PointStore;

use self::kdtree::KdTree;

/// A neighbour of some query point together with its squared distance.
///
/// # Examples
/// ```
/// use strand_core::{Point, PointStore, SpatialIndex};
///
/// let store = PointStore::new("line", vec![
///     Point::new(0, 0, 0),
///     Point::new(3, 4, 0),
/// ]);
/// let table = SpatialIndex::build(&store).query_all_pairs();
/// assert_eq!(table[0][0].id(), 1);
/// assert_eq!(table[0][0].squared_distance(), 25);
/// assert!((table[0][0].distance() - 5.0).abs() < f64::EPSILON);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Neighbour {
    id: usize,
    squared_distance: u128,
}

impl Neighbour {
    /// Returns the neighbour's point index.
    #[must_use]
    #[rustfmt::skip]
    pub const fn id(&self) -> usize { self.id }

    /// Returns the exact squared distance to the query point.
    #[must_use]
    #[rustfmt::skip]
    pub const fn squared_distance(&self) -> u128 { self.squared_distance }

    /// Returns the Euclidean distance to the query point.
    #[must_use]
    pub fn distance(&self) -> f64 {
        (self.squared_distance as f64).sqrt()
    }
}

/// Nearest-neighbour index built once over a [`PointStore`].
///
/// # Examples
/// ```
/// use strand_core::{Point, PointStore, SpatialIndex};
///
/// let store = PointStore::new("triangle", vec![
///     Point::new(0, 0, 0),
///     Point::new(1, 0, 0),
///     Point::new(0, 1, 0),
/// ]);
/// let index = SpatialIndex::build(&store);
/// let table = index.query_all_pairs();
/// assert_eq!(table.len(), 3);
/// assert!(table.iter().all(|neighbours| neighbours.len() == 2));
/// ```
#[derive(Clone, Debug)]
pub struct SpatialIndex<'a> {
    store: &'a PointStore,
    tree: KdTree,
    parallel: bool,
}

impl<'a> SpatialIndex<'a> {
    /// Builds the index over every point in `store`.
    #[must_use]
    #[instrument(name = "index.build", skip(store), fields(points = store.len()))]
    pub fn build(store: &'a PointStore) -> Self {
        let tree = KdTree::build(store.points());
        debug!("spatial index built");
        Self {
            store,
            tree,
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Enables or disables parallel per-point queries.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    #[must_use]
    pub const fn with_parallelism(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Returns the indexed store.
    #[must_use]
    pub const fn store(&self) -> &'a PointStore {
        self.store
    }

    /// Returns the number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns whether the index holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the `k` nearest neighbours of the point at `query`, excluding
    /// the point itself, ordered by `(squared distance, id)`.
    ///
    /// Returns fewer than `k` neighbours when the store is smaller than
    /// `k + 1`, and an empty list when `query` is out of bounds.
    #[must_use]
    pub fn nearest(&self, query: usize, k: usize) -> Vec<Neighbour> {
        if query >= self.len() {
            return Vec::new();
        }
        self.tree
            .nearest(self.store.points(), query, k)
            .into_iter()
            .map(|(squared_distance, id)| Neighbour {
                id,
                squared_distance,
            })
            .collect()
    }

    /// Returns, for every point, its `k` nearest neighbours.
    ///
    /// Row `i` holds the neighbours of point `i` ordered by
    /// `(squared distance, id)`.
    #[must_use]
    #[instrument(
        name = "index.query_neighbours",
        skip(self),
        fields(points = self.len(), parallel = self.parallel),
    )]
    pub fn query_neighbours(&self, k: usize) -> Vec<Vec<Neighbour>> {
        #[cfg(feature = "parallel")]
        if self.parallel {
            return (0..self.len())
                .into_par_iter()
                .map(|query| self.nearest(query, k))
                .collect();
        }

        (0..self.len())
            .map(|query| self.nearest(query, k))
            .collect()
    }

    /// Returns, for every point, its distance to every other point.
    ///
    /// An empty store yields an empty table.
    #[must_use]
    pub fn query_all_pairs(&self) -> Vec<Vec<Neighbour>> {
        self.query_neighbours(self.len().saturating_sub(1))
    }
}
