//! Static three-dimensional k-d tree over a point slice.
//!
//! The tree stores a permutation of point ids and an arena of nodes. Each
//! node carries the bounding box of its points so queries can prune whole
//! subtrees whose box lies further away than the current k-th neighbour.

use std::collections::BinaryHeap;

use crate::point::Point;

/// Maximum number of points held by a leaf.
const LEAF_SIZE: usize = 8;

#[derive(Clone, Copy, Debug)]
struct Bounds {
    min: [u32; 3],
    max: [u32; 3],
}

impl Bounds {
    fn enclosing(points: &[Point], ids: &[usize]) -> Self {
        let mut min = [u32::MAX; 3];
        let mut max = [0; 3];
        for &id in ids {
            for (axis, value) in points[id].coords().into_iter().enumerate() {
                min[axis] = min[axis].min(value);
                max[axis] = max[axis].max(value);
            }
        }
        Self { min, max }
    }

    fn widest_axis(&self) -> usize {
        let extent = |axis: usize| self.max[axis] - self.min[axis];
        (0..3).fold(0, |best, axis| {
            if extent(axis) > extent(best) {
                axis
            } else {
                best
            }
        })
    }

    /// Squared distance from `query` to the nearest point of the box.
    fn squared_distance_to(&self, query: [u32; 3]) -> u128 {
        (0..3)
            .map(|axis| {
                let value = query[axis];
                let gap = if value < self.min[axis] {
                    self.min[axis] - value
                } else if value > self.max[axis] {
                    value - self.max[axis]
                } else {
                    0
                };
                u128::from(gap) * u128::from(gap)
            })
            .sum()
    }
}

#[derive(Clone, Copy, Debug)]
enum Node {
    Leaf {
        bounds: Bounds,
        start: usize,
        end: usize,
    },
    Split {
        bounds: Bounds,
        left: usize,
        right: usize,
    },
}

impl Node {
    const fn bounds(&self) -> &Bounds {
        match self {
            Self::Leaf { bounds, .. } | Self::Split { bounds, .. } => bounds,
        }
    }
}

/// Candidate neighbour ordered by `(squared distance, id)`.
pub(super) type Candidate = (u128, usize);

#[derive(Clone, Debug)]
pub(super) struct KdTree {
    nodes: Vec<Node>,
    ids: Vec<usize>,
    root: Option<usize>,
}

impl KdTree {
    pub(super) fn build(points: &[Point]) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(points.len().saturating_mul(2) / LEAF_SIZE + 1),
            ids: (0..points.len()).collect(),
            root: None,
        };
        if !points.is_empty() {
            tree.root = Some(tree.build_range(points, 0, points.len()));
        }
        tree
    }

    fn build_range(&mut self, points: &[Point], start: usize, end: usize) -> usize {
        let bounds = Bounds::enclosing(points, &self.ids[start..end]);
        let count = end - start;
        if count <= LEAF_SIZE {
            self.nodes.push(Node::Leaf { bounds, start, end });
            return self.nodes.len() - 1;
        }

        let axis = bounds.widest_axis();
        let half = count / 2;
        self.ids[start..end]
            .select_nth_unstable_by_key(half, |&id| (points[id].coords()[axis], id));

        let left = self.build_range(points, start, start + half);
        let right = self.build_range(points, start + half, end);
        self.nodes.push(Node::Split {
            bounds,
            left,
            right,
        });
        self.nodes.len() - 1
    }

    /// Returns the `k` points nearest to `points[query]`, excluding the query
    /// itself, ordered by `(squared distance, id)`.
    pub(super) fn nearest(&self, points: &[Point], query: usize, k: usize) -> Vec<Candidate> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        if k == 0 {
            return Vec::new();
        }

        let mut search = Search {
            points,
            query,
            origin: points[query].coords(),
            k,
            heap: BinaryHeap::with_capacity(k.saturating_add(1)),
        };
        self.visit(root, &mut search);
        search.heap.into_sorted_vec()
    }

    fn visit(&self, node: usize, search: &mut Search<'_>) {
        match self.nodes[node] {
            Node::Leaf { start, end, .. } => {
                for &id in &self.ids[start..end] {
                    search.offer(id);
                }
            }
            Node::Split { left, right, .. } => {
                let left_gap = self.nodes[left].bounds().squared_distance_to(search.origin);
                let right_gap = self.nodes[right].bounds().squared_distance_to(search.origin);
                let (near, near_gap, far, far_gap) = if left_gap <= right_gap {
                    (left, left_gap, right, right_gap)
                } else {
                    (right, right_gap, left, left_gap)
                };
                if search.admits(near_gap) {
                    self.visit(near, search);
                }
                if search.admits(far_gap) {
                    self.visit(far, search);
                }
            }
        }
    }
}

struct Search<'a> {
    points: &'a [Point],
    query: usize,
    origin: [u32; 3],
    k: usize,
    heap: BinaryHeap<Candidate>,
}

impl Search<'_> {
    /// A subtree at `gap` may still hold a candidate: ties at the current
    /// worst distance can win on id, so equality does not prune.
    fn admits(&self, gap: u128) -> bool {
        self.heap.len() < self.k || self.heap.peek().is_some_and(|&(worst, _)| gap <= worst)
    }

    fn offer(&mut self, id: usize) {
        if id == self.query {
            return;
        }
        let candidate = (
            self.points[self.query].squared_distance(self.points[id]),
            id,
        );
        if self.heap.len() < self.k {
            self.heap.push(candidate);
        } else if self.heap.peek().is_some_and(|worst| candidate < *worst) {
            self.heap.pop();
            self.heap.push(candidate);
        }
    }
}
