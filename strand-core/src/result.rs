//! Reports returned by [`crate::Strand`] queries.

use crate::{Result, error::StrandError, point::Point, ranker::Edge};

/// Outcome of the bounded component query.
///
/// # Examples
/// ```
/// use strand_core::{Point, PointStore, StrandBuilder};
///
/// let store = PointStore::new("pair", vec![Point::new(0, 0, 0), Point::new(1, 0, 0)]);
/// let strand = StrandBuilder::new().with_connections(1).build()?;
/// let report = strand.cluster(&store)?;
/// assert_eq!(report.sizes(), &[2]);
/// assert_eq!(report.product(), 2);
/// # Ok::<(), strand_core::StrandError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterReport {
    data_source: String,
    point_count: usize,
    edges_consumed: usize,
    sizes: Vec<usize>,
    product: u64,
}

impl ClusterReport {
    /// Builds a report, multiplying `sizes` together.
    ///
    /// # Errors
    /// Returns [`StrandError::ProductOverflow`] when the product does not fit
    /// in `u64`.
    pub(crate) fn new(
        data_source: impl Into<String>,
        point_count: usize,
        edges_consumed: usize,
        sizes: Vec<usize>,
    ) -> Result<Self> {
        let product = sizes
            .iter()
            .map(|&size| u64::try_from(size).ok())
            .try_fold(1_u64, |acc, size| acc.checked_mul(size?))
            .ok_or_else(|| StrandError::ProductOverflow {
                sizes: sizes.clone(),
            })?;
        Ok(Self {
            data_source: data_source.into(),
            point_count,
            edges_consumed,
            sizes,
            product,
        })
    }

    /// Returns the name of the store the query ran against.
    #[must_use]
    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    /// Returns the number of points in the store.
    #[must_use]
    #[rustfmt::skip]
    pub fn point_count(&self) -> usize { self.point_count }

    /// Returns how many ranked edges were consumed.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges_consumed(&self) -> usize { self.edges_consumed }

    /// Returns the largest component sizes, descending.
    ///
    /// Holds fewer than `top_k` entries when fewer components exist.
    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Returns the product of [`Self::sizes`], or `1` when there are none.
    #[must_use]
    #[rustfmt::skip]
    pub fn product(&self) -> u64 { self.product }
}

/// The two points joined by the spanning edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanningPair {
    edge: Edge,
    rank: usize,
    left: Point,
    right: Point,
}

impl SpanningPair {
    pub(crate) const fn new(edge: Edge, rank: usize, left: Point, right: Point) -> Self {
        Self {
            edge,
            rank,
            left,
            right,
        }
    }

    /// Returns the edge that completed the span.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge(&self) -> Edge { self.edge }

    /// Returns the zero-based rank of the edge in the global ranking.
    #[must_use]
    #[rustfmt::skip]
    pub const fn rank(&self) -> usize { self.rank }

    /// Returns the point at [`Edge::source`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn left(&self) -> Point { self.left }

    /// Returns the point at [`Edge::target`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn right(&self) -> Point { self.right }

    /// Returns the product of the two points' x coordinates.
    ///
    /// Two `u32` factors always fit in `u64`.
    #[must_use]
    pub fn x_product(&self) -> u64 {
        u64::from(self.left.x()) * u64::from(self.right.x())
    }
}

/// Outcome of the spanning query.
///
/// Stores with fewer than two points are spanning before any edge is
/// consumed, so they report no pair.
///
/// # Examples
/// ```
/// use strand_core::{Point, PointStore, StrandBuilder};
///
/// let store = PointStore::new("pair", vec![Point::new(2, 0, 0), Point::new(3, 0, 0)]);
/// let report = StrandBuilder::new().build()?.span(&store)?;
/// assert_eq!(report.x_product(), Some(6));
///
/// let single = PointStore::new("single", vec![Point::new(2, 0, 0)]);
/// assert!(StrandBuilder::new().build()?.span(&single)?.spanning().is_none());
/// # Ok::<(), strand_core::StrandError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanReport {
    data_source: String,
    point_count: usize,
    spanning: Option<SpanningPair>,
}

impl SpanReport {
    pub(crate) fn new(
        data_source: impl Into<String>,
        point_count: usize,
        spanning: Option<SpanningPair>,
    ) -> Self {
        Self {
            data_source: data_source.into(),
            point_count,
            spanning,
        }
    }

    /// Returns the name of the store the query ran against.
    #[must_use]
    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    /// Returns the number of points in the store.
    #[must_use]
    #[rustfmt::skip]
    pub fn point_count(&self) -> usize { self.point_count }

    /// Returns the spanning pair, if an edge was needed.
    #[must_use]
    #[rustfmt::skip]
    pub fn spanning(&self) -> Option<&SpanningPair> { self.spanning.as_ref() }

    /// Returns the x-coordinate product of the spanning pair.
    #[must_use]
    pub fn x_product(&self) -> Option<u64> {
        self.spanning.as_ref().map(SpanningPair::x_product)
    }
}
