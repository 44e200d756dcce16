//! Union-find (disjoint set union) arena backing the component forest.
//!
//! Union by size with two-pass path compression. Each root additionally
//! caches the smallest member index of its set so component listings can be
//! ordered without scanning members.

use std::cmp::Ordering;

#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    min_member: Vec<usize>,
}

impl DisjointSet {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            min_member: (0..n).collect(),
        }
    }

    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the sets holding `left` and `right`, returning the surviving
    /// root and the absorbed one, or `None` when they already share a set.
    ///
    /// The larger set survives; on equal sizes the lower root index does.
    pub(super) fn union(&mut self, left: usize, right: usize) -> Option<(usize, usize)> {
        let left = self.find(left);
        let right = self.find(right);
        if left == right {
            return None;
        }
        let (root, child) = match self.size[left].cmp(&self.size[right]) {
            Ordering::Greater => (left, right),
            Ordering::Less => (right, left),
            Ordering::Equal => (left.min(right), left.max(right)),
        };
        self.parent[child] = root;
        self.size[root] += self.size[child];
        self.min_member[root] = self.min_member[root].min(self.min_member[child]);
        Some((root, child))
    }

    pub(super) fn is_root(&self, node: usize) -> bool {
        self.parent[node] == node
    }

    pub(super) fn size_of_root(&self, root: usize) -> usize {
        self.size[root]
    }

    pub(super) fn min_member_of_root(&self, root: usize) -> usize {
        self.min_member[root]
    }
}
