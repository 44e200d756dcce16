//! Immutable storage for labelled points in three-dimensional integer space.
//!
//! A point's label is its position in the [`PointStore`]; indices are stable
//! for the lifetime of the store.

use crate::{Result, error::StrandError};

/// A point with non-negative integer coordinates.
///
/// Coordinates fit in `u32`, so squared distances are exact in `u128` and the
/// product of two coordinates is exact in `u64`.
///
/// # Examples
/// ```
/// use strand_core::Point;
///
/// let a = Point::new(0, 0, 0);
/// let b = Point::new(1, 2, 2);
/// assert_eq!(a.squared_distance(b), 9);
/// assert_eq!(b.coords(), [1, 2, 2]);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Point {
    x: u32,
    y: u32,
    z: u32,
}

impl Point {
    /// Creates a point from its coordinates.
    #[must_use]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Returns the x coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn x(&self) -> u32 { self.x }

    /// Returns the y coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn y(&self) -> u32 { self.y }

    /// Returns the z coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn z(&self) -> u32 { self.z }

    /// Returns the coordinates as `[x, y, z]`.
    #[must_use]
    pub const fn coords(&self) -> [u32; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the exact squared Euclidean distance to `other`.
    #[must_use]
    pub fn squared_distance(&self, other: Self) -> u128 {
        self.coords()
            .iter()
            .zip(other.coords())
            .map(|(&left, right)| {
                let delta = u128::from(left.abs_diff(right));
                delta * delta
            })
            .sum()
    }
}

/// Immutable, named collection of points addressed by index.
///
/// An empty store is valid; every query over it yields an empty result.
///
/// # Examples
/// ```
/// use strand_core::{Point, PointStore};
///
/// let store = PointStore::new("demo", vec![Point::new(0, 0, 0), Point::new(3, 4, 0)]);
/// assert_eq!(store.len(), 2);
/// assert_eq!(store.name(), "demo");
/// assert_eq!(store.squared_distance(0, 1)?, 25);
/// # Ok::<(), strand_core::StrandError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointStore {
    name: String,
    points: Vec<Point>,
}

impl PointStore {
    /// Creates a store from points in label order.
    #[must_use]
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Returns the human-readable name of the store.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the store contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the point at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Returns the point at `index`.
    ///
    /// # Errors
    /// Returns [`StrandError::InvalidPointIndex`] when `index` is out of bounds.
    pub fn point(&self, index: usize) -> Result<Point> {
        self.get(index).ok_or(StrandError::InvalidPointIndex {
            index,
            point_count: self.len(),
        })
    }

    /// Returns all points in label order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns an iterator over the points in label order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Returns the exact squared distance between the points at `left` and
    /// `right`.
    ///
    /// # Errors
    /// Returns [`StrandError::InvalidPointIndex`] when either index is out of
    /// bounds.
    pub fn squared_distance(&self, left: usize, right: usize) -> Result<u128> {
        Ok(self.point(left)?.squared_distance(self.point(right)?))
    }
}
