//! Connected components grown from ranked proximity edges.
//!
//! [`ComponentForest`] consumes edges one at a time and classifies each by
//! the state of its endpoints:
//!
//! - both untouched: a new two-point component is created;
//! - one touched: the untouched point joins the other's component;
//! - touched in different components: the two components merge;
//! - touched in the same component: nothing changes.
//!
//! Points no consumed edge has reached are implicit singletons and are never
//! reported as components. Consumption is strictly serial; the order of
//! merges decides which edge completes the span.

mod union_find;

use std::borrow::Borrow;

use tracing::{debug, instrument};

use crate::{Result, error::StrandError, ranker::Edge};

use self::union_find::DisjointSet;

/// The effect consuming a single edge had on the forest.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition {
    /// Two untouched points formed a new component rooted at `root`.
    Created {
        /// Representative of the new component.
        root: usize,
    },
    /// The untouched point `joined` was added to the component at `root`.
    Grown {
        /// Representative of the grown component.
        root: usize,
        /// Point that joined the component.
        joined: usize,
    },
    /// The component at `absorbed` was merged into the one at `root`.
    Merged {
        /// Representative of the surviving component.
        root: usize,
        /// Former representative of the absorbed component.
        absorbed: usize,
    },
    /// Both endpoints already belonged to the component at `root`.
    Internal {
        /// Representative of the component.
        root: usize,
    },
    /// The edge joined `point` to itself and was ignored.
    SelfLoop {
        /// The repeated endpoint.
        point: usize,
    },
}

/// Size of one component together with its smallest member index.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ComponentSummary {
    smallest_member: usize,
    size: usize,
}

impl ComponentSummary {
    /// Returns the smallest point index in the component.
    #[must_use]
    #[rustfmt::skip]
    pub const fn smallest_member(&self) -> usize { self.smallest_member }

    /// Returns the number of points in the component.
    #[must_use]
    #[rustfmt::skip]
    pub const fn size(&self) -> usize { self.size }
}

/// The edge whose consumption first joined every point into one component.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpanningEdge {
    edge: Edge,
    rank: usize,
}

impl SpanningEdge {
    /// Returns the spanning edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge(&self) -> Edge { self.edge }

    /// Returns the zero-based position of the edge in the consumed stream.
    #[must_use]
    #[rustfmt::skip]
    pub const fn rank(&self) -> usize { self.rank }
}

/// Partition of touched points into components, grown edge by edge.
///
/// # Examples
/// ```
/// use strand_core::{ComponentForest, Edge, Transition};
///
/// let mut forest = ComponentForest::new(3);
/// let first = forest.consume(&Edge::new(0, 1, 1))?;
/// assert_eq!(first, Transition::Created { root: 0 });
/// let second = forest.consume(&Edge::new(0, 2, 1))?;
/// assert_eq!(second, Transition::Grown { root: 0, joined: 2 });
/// assert!(forest.is_spanning());
/// assert_eq!(forest.largest_sizes(1), vec![3]);
/// # Ok::<(), strand_core::StrandError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ComponentForest {
    sets: DisjointSet,
    touched: Vec<bool>,
    touched_count: usize,
    components: usize,
    consumed: usize,
}

impl ComponentForest {
    /// Creates a forest over `total_points` untouched points.
    #[must_use]
    pub fn new(total_points: usize) -> Self {
        Self {
            sets: DisjointSet::new(total_points),
            touched: vec![false; total_points],
            touched_count: 0,
            components: 0,
            consumed: 0,
        }
    }

    /// Returns the number of points the forest partitions.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.touched.len()
    }

    /// Returns the number of components formed so far.
    #[must_use]
    #[rustfmt::skip]
    pub const fn component_count(&self) -> usize { self.components }

    /// Returns the number of points reached by at least one consumed edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn touched_count(&self) -> usize { self.touched_count }

    /// Returns the number of points no consumed edge has reached.
    #[must_use]
    pub fn untouched_count(&self) -> usize {
        self.total_points() - self.touched_count
    }

    /// Returns the number of edges consumed so far.
    #[must_use]
    #[rustfmt::skip]
    pub const fn consumed(&self) -> usize { self.consumed }

    /// Returns whether a single component holds every point.
    ///
    /// Forests over zero or one point are trivially spanning.
    #[must_use]
    pub fn is_spanning(&self) -> bool {
        self.total_points() <= 1
            || (self.components == 1 && self.touched_count == self.total_points())
    }

    /// Returns whether `point` has been reached by a consumed edge.
    ///
    /// # Errors
    /// Returns [`StrandError::InvalidPointIndex`] when `point` is out of bounds.
    pub fn is_touched(&self, point: usize) -> Result<bool> {
        self.check_index(point)?;
        Ok(self.touched[point])
    }

    /// Consumes one edge and reports the resulting transition.
    ///
    /// # Errors
    /// Returns [`StrandError::InvalidPointIndex`] when either endpoint is out
    /// of bounds; the forest is left unchanged.
    pub fn consume(&mut self, edge: &Edge) -> Result<Transition> {
        let (left, right) = edge.endpoints();
        self.check_index(left)?;
        self.check_index(right)?;
        self.consumed += 1;

        if left == right {
            return Ok(Transition::SelfLoop { point: left });
        }

        let transition = match (self.touched[left], self.touched[right]) {
            (false, false) => {
                let root = self.join(left, right);
                self.touch(left);
                self.touch(right);
                self.components += 1;
                Transition::Created { root }
            }
            (true, false) => Transition::Grown {
                root: self.grow(left, right),
                joined: right,
            },
            (false, true) => Transition::Grown {
                root: self.grow(right, left),
                joined: left,
            },
            (true, true) => match self.sets.union(left, right) {
                Some((root, absorbed)) => {
                    self.components -= 1;
                    Transition::Merged { root, absorbed }
                }
                None => Transition::Internal {
                    root: self.sets.find(left),
                },
            },
        };
        Ok(transition)
    }

    /// Consumes every edge from `edges` in order.
    ///
    /// # Errors
    /// Stops at and returns the first [`StrandError::InvalidPointIndex`].
    pub fn consume_all<E, I>(&mut self, edges: I) -> Result<()>
    where
        E: Borrow<Edge>,
        I: IntoIterator<Item = E>,
    {
        for edge in edges {
            self.consume(edge.borrow())?;
        }
        Ok(())
    }

    /// Returns whether `left` and `right` belong to the same component.
    ///
    /// Untouched points share a component with nothing but themselves.
    ///
    /// # Errors
    /// Returns [`StrandError::InvalidPointIndex`] when either point is out of
    /// bounds.
    pub fn same_component(&mut self, left: usize, right: usize) -> Result<bool> {
        self.check_index(left)?;
        self.check_index(right)?;
        Ok(self.sets.find(left) == self.sets.find(right))
    }

    /// Returns the size of the component containing `point`, or `1` when the
    /// point is untouched.
    ///
    /// # Errors
    /// Returns [`StrandError::InvalidPointIndex`] when `point` is out of bounds.
    pub fn component_size(&mut self, point: usize) -> Result<usize> {
        self.check_index(point)?;
        let root = self.sets.find(point);
        Ok(self.sets.size_of_root(root))
    }

    /// Returns every component, largest first.
    ///
    /// Components of equal size are ordered by their smallest member index,
    /// ascending.
    #[must_use]
    pub fn components(&self) -> Vec<ComponentSummary> {
        let mut summaries: Vec<ComponentSummary> = (0..self.total_points())
            .filter(|&point| self.touched[point] && self.sets.is_root(point))
            .map(|root| ComponentSummary {
                smallest_member: self.sets.min_member_of_root(root),
                size: self.sets.size_of_root(root),
            })
            .collect();
        summaries.sort_unstable_by(|a, b| {
            b.size
                .cmp(&a.size)
                .then_with(|| a.smallest_member.cmp(&b.smallest_member))
        });
        summaries
    }

    /// Returns the sizes of the `top_k` largest components, descending.
    #[must_use]
    pub fn largest_sizes(&self, top_k: usize) -> Vec<usize> {
        self.components()
            .into_iter()
            .take(top_k)
            .map(|summary| summary.size)
            .collect()
    }

    fn grow(&mut self, member: usize, joining: usize) -> usize {
        let root = self.join(member, joining);
        self.touch(joining);
        root
    }

    fn join(&mut self, left: usize, right: usize) -> usize {
        match self.sets.union(left, right) {
            Some((root, _)) => root,
            None => self.sets.find(left),
        }
    }

    fn touch(&mut self, point: usize) {
        self.touched[point] = true;
        self.touched_count += 1;
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.total_points() {
            Ok(())
        } else {
            Err(StrandError::InvalidPointIndex {
                index,
                point_count: self.total_points(),
            })
        }
    }
}

/// Consumes every edge and returns the `top_k` largest component sizes,
/// descending.
///
/// Untouched points are not components, so consuming no edges yields an
/// empty list. Equal sizes are ordered by smallest member index; the values
/// returned do not depend on that order.
///
/// # Errors
/// Returns [`StrandError::InvalidPointIndex`] when an edge references a point
/// `>= total_points`.
///
/// # Examples
/// ```
/// use strand_core::{Edge, largest_component_sizes};
///
/// let edges = [Edge::new(0, 1, 1), Edge::new(0, 2, 1)];
/// assert_eq!(largest_component_sizes(&edges, 3, 1)?, vec![3]);
/// assert!(largest_component_sizes(&[] as &[Edge], 1, 3)?.is_empty());
/// # Ok::<(), strand_core::StrandError>(())
/// ```
#[instrument(name = "forest.largest", skip(edges), err)]
pub fn largest_component_sizes<E, I>(
    edges: I,
    total_points: usize,
    top_k: usize,
) -> Result<Vec<usize>>
where
    E: Borrow<Edge>,
    I: IntoIterator<Item = E>,
{
    let mut forest = ComponentForest::new(total_points);
    forest.consume_all(edges)?;
    let sizes = forest.largest_sizes(top_k);
    debug!(
        consumed = forest.consumed(),
        components = forest.component_count(),
        "edges consumed"
    );
    Ok(sizes)
}

/// Consumes edges until one component holds all `total_points` points and
/// returns the edge that completed it.
///
/// Returns `Ok(None)` for zero or one point, which are spanning before any
/// edge is consumed. Edges after the spanning one are never pulled from the
/// stream.
///
/// # Errors
/// Returns [`StrandError::InsufficientEdges`] when the stream ends first and
/// [`StrandError::InvalidPointIndex`] when an edge references a point
/// `>= total_points`.
///
/// # Examples
/// ```
/// use strand_core::{Edge, StrandError, find_spanning_edge};
///
/// let edges = [Edge::new(0, 1, 1), Edge::new(2, 3, 1), Edge::new(1, 2, 81)];
/// let spanning = find_spanning_edge(&edges, 4)?.expect("four points need an edge");
/// assert_eq!(spanning.edge().endpoints(), (1, 2));
/// assert_eq!(spanning.rank(), 2);
///
/// let err = find_spanning_edge(&edges[..2], 4).expect_err("bridge missing");
/// assert!(matches!(err, StrandError::InsufficientEdges { .. }));
/// # Ok::<(), StrandError>(())
/// ```
#[instrument(name = "forest.span", skip(edges), err)]
pub fn find_spanning_edge<E, I>(edges: I, total_points: usize) -> Result<Option<SpanningEdge>>
where
    E: Borrow<Edge>,
    I: IntoIterator<Item = E>,
{
    let mut forest = ComponentForest::new(total_points);
    if forest.is_spanning() {
        return Ok(None);
    }

    for (rank, edge) in edges.into_iter().enumerate() {
        let edge: Edge = *edge.borrow();
        forest.consume(&edge)?;
        if forest.is_spanning() {
            debug!(rank, "span completed");
            return Ok(Some(SpanningEdge { edge, rank }));
        }
    }

    Err(StrandError::InsufficientEdges {
        consumed: forest.consumed(),
        components: forest.component_count(),
        untouched: forest.untouched_count(),
    })
}
