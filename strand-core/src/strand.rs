//! Query orchestration for the Strand library.
//!
//! Provides the [`Strand`] entry point, which wires the point store, spatial
//! index, edge ranker and component forest together for both queries.

use std::num::NonZeroUsize;

use tracing::{info, instrument, warn};

use crate::{
    Result,
    builder::ExecutionStrategy,
    forest::{find_spanning_edge, largest_component_sizes},
    index::SpatialIndex,
    point::PointStore,
    ranker::EdgeRanker,
    result::{ClusterReport, SpanReport, SpanningPair},
};

/// Entry point for running proximity queries over a [`PointStore`].
///
/// Each call builds its own index and forest, so one instance can serve any
/// number of stores.
///
/// # Examples
/// ```
/// use strand_core::{Point, PointStore, StrandBuilder};
///
/// let store = PointStore::new("two-pairs", vec![
///     Point::new(0, 0, 0),
///     Point::new(1, 0, 0),
///     Point::new(10, 0, 0),
///     Point::new(11, 0, 0),
/// ]);
/// let strand = StrandBuilder::new()
///     .with_connections(2)
///     .with_top_k(2)
///     .build()
///     .expect("builder must succeed");
///
/// let clusters = strand.cluster(&store).expect("cluster must succeed");
/// assert_eq!(clusters.sizes(), &[2, 2]);
///
/// let span = strand.span(&store).expect("span must succeed");
/// assert_eq!(span.x_product(), Some(10));
/// ```
#[derive(Debug, Clone)]
pub struct Strand {
    connections: usize,
    top_k: NonZeroUsize,
    execution_strategy: ExecutionStrategy,
}

impl Strand {
    pub(crate) fn new(
        connections: usize,
        top_k: NonZeroUsize,
        execution_strategy: ExecutionStrategy,
    ) -> Self {
        Self {
            connections,
            top_k,
            execution_strategy,
        }
    }

    /// Returns how many ranked edges [`Self::cluster`] consumes.
    #[must_use]
    pub fn connections(&self) -> usize {
        self.connections
    }

    /// Returns how many component sizes [`Self::cluster`] reports.
    #[must_use]
    pub fn top_k(&self) -> NonZeroUsize {
        self.top_k
    }

    /// Returns the execution strategy used for neighbour queries.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Consumes the `connections` shortest edges and reports the `top_k`
    /// largest component sizes with their product.
    ///
    /// An empty store yields no sizes and the empty product `1`.
    ///
    /// # Errors
    /// Returns [`crate::StrandError::ProductOverflow`] when the product of the
    /// reported sizes does not fit in `u64`.
    #[instrument(
        name = "core.cluster",
        err,
        skip(self, store),
        fields(
            data_source = %store.name(),
            points = store.len(),
            connections = self.connections,
            top_k = %self.top_k,
            strategy = ?self.execution_strategy
        ),
    )]
    pub fn cluster(&self, store: &PointStore) -> Result<ClusterReport> {
        if store.is_empty() {
            warn!(
                data_source = store.name(),
                "point store is empty, reporting no components"
            );
        }

        let index = self.index(store);
        let edges = EdgeRanker::new(&index).take(self.connections);
        let sizes = largest_component_sizes(&edges, store.len(), self.top_k.get())?;
        let report = ClusterReport::new(store.name(), store.len(), edges.len(), sizes)?;
        info!(
            edges = report.edges_consumed(),
            components = report.sizes().len(),
            product = report.product(),
            "cluster query completed"
        );
        Ok(report)
    }

    /// Consumes the full ranking until every point shares one component and
    /// reports the edge that completed it.
    ///
    /// Stores with fewer than two points report no pair.
    ///
    /// # Errors
    /// Returns [`crate::StrandError::InsufficientEdges`] if the ranking runs
    /// out first, which a complete ranking never does.
    #[instrument(
        name = "core.span",
        err,
        skip(self, store),
        fields(
            data_source = %store.name(),
            points = store.len(),
            strategy = ?self.execution_strategy
        ),
    )]
    pub fn span(&self, store: &PointStore) -> Result<SpanReport> {
        let index = self.index(store);
        let edges = EdgeRanker::new(&index).rank_edges();
        let spanning = match find_spanning_edge(&edges, store.len())? {
            Some(found) => {
                let edge = found.edge();
                let left = store.point(edge.source())?;
                let right = store.point(edge.target())?;
                Some(SpanningPair::new(edge, found.rank(), left, right))
            }
            None => None,
        };
        let report = SpanReport::new(store.name(), store.len(), spanning);
        info!(
            edges = edges.len(),
            rank = ?report.spanning().map(SpanningPair::rank),
            x_product = ?report.x_product(),
            "span query completed"
        );
        Ok(report)
    }

    fn index<'a>(&self, store: &'a PointStore) -> SpatialIndex<'a> {
        SpatialIndex::build(store).with_parallelism(self.execution_strategy.is_parallel())
    }
}
