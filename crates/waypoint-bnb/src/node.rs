// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Search nodes and their ordering.
//!
//! A `SearchNode` pairs a partial path with the priority it is queued under.
//! Nodes are never mutated once created; `extend` copies the path and appends
//! one node, so a path owned by a queued node can never change underneath it.
//!
//! The frontier pops nodes in this order:
//! 1. smaller `key` first,
//! 2. on equal keys, the longer path first (drives toward completion),
//! 3. on equal lengths, the path whose last node id is smaller first,
//! 4. on a full tie, the lexicographically smaller path first.
//!
//! Rules 2 and 3 are a reproducibility choice rather than a requirement of
//! branch-and-bound or A*. Rule 4 makes the order total, so the popped node
//! never depends on the internal layout of the heap.

use smallvec::SmallVec;
use std::cmp::Ordering;
use waypoint_core::num::constants::Zero;
use waypoint_model::index::{DEPOT, NodeIndex};

/// Inline capacity of a path before it spills to the heap.
const INLINE_PATH: usize = 16;

/// The node sequence of a partial tour.
pub type SearchPath = SmallVec<[NodeIndex; INLINE_PATH]>;

/// A partial path, its accumulated cost and its queue priority.
#[derive(Clone, Debug)]
pub struct SearchNode<T> {
    path: SearchPath,
    cost: T,
    key: T,
}

impl<T> SearchNode<T>
where
    T: Copy + Zero,
{
    /// The initial node: the path `[0]` with cost and key zero.
    #[inline]
    pub fn root() -> Self {
        let mut path = SearchPath::new();
        path.push(DEPOT);
        Self {
            path,
            cost: T::ZERO,
            key: T::ZERO,
        }
    }
}

impl<T> SearchNode<T>
where
    T: Copy,
{
    /// Creates a node from its parts.
    ///
    /// # Panics
    ///
    /// Panics if `path` is empty.
    #[inline]
    pub fn new(path: SearchPath, cost: T, key: T) -> Self {
        assert!(
            !path.is_empty(),
            "called `SearchNode::new` with an empty path"
        );
        Self { path, cost, key }
    }

    /// Returns a new node whose path is this path followed by `next`.
    #[inline]
    pub fn extend(&self, next: NodeIndex, cost: T, key: T) -> Self {
        let mut path = SearchPath::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(next);
        Self { path, cost, key }
    }

    #[inline]
    pub fn path(&self) -> &[NodeIndex] {
        &self.path
    }

    /// Returns the path cost (sum of traversed edges).
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Returns the priority the node is queued under.
    #[inline]
    pub fn key(&self) -> T {
        self.key
    }

    /// Returns the number of entries in the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Always `false`: a node holds at least the depot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Returns the most recently visited node.
    #[inline]
    pub fn last(&self) -> NodeIndex {
        debug_assert!(!self.path.is_empty());
        self.path[self.path.len() - 1]
    }

    #[inline]
    pub fn into_path(self) -> SearchPath {
        self.path
    }
}

impl<T> PartialEq for SearchNode<T>
where
    T: Ord + Copy,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for SearchNode<T> where T: Ord + Copy {}

impl<T> PartialOrd for SearchNode<T>
where
    T: Ord + Copy,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `BinaryHeap` is a max-heap, so the node that should pop first compares greatest.
impl<T> Ord for SearchNode<T>
where
    T: Ord + Copy,
{
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| self.path.len().cmp(&other.path.len()))
            .then_with(|| other.last().cmp(&self.last()))
            .then_with(|| other.path.cmp(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(ids: &[usize], key: i64) -> SearchNode<i64> {
        let path = ids.iter().copied().map(NodeIndex::new).collect();
        SearchNode::new(path, key, key)
    }

    #[test]
    fn test_root_is_depot_with_zero_key() {
        let root = SearchNode::<i64>::root();
        assert_eq!(root.path(), &[DEPOT]);
        assert_eq!(root.key(), 0);
        assert_eq!(root.cost(), 0);
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn test_extend_copies_and_leaves_parent_untouched() {
        let parent = node(&[0, 2], 5);
        let child = parent.extend(NodeIndex::new(1), 7, 9);
        assert_eq!(parent.path(), &[NodeIndex::new(0), NodeIndex::new(2)]);
        assert_eq!(child.len(), 3);
        assert_eq!(child.last(), NodeIndex::new(1));
        assert_eq!(child.cost(), 7);
        assert_eq!(child.key(), 9);
    }

    #[test]
    fn test_smaller_key_pops_first() {
        assert!(node(&[0, 1], 3) > node(&[0, 2], 4));
        assert!(node(&[0, 1, 2], 8) < node(&[0, 2], 4));
    }

    #[test]
    fn test_equal_key_prefers_longer_path() {
        assert!(node(&[0, 2, 1], 4) > node(&[0, 1], 4));
    }

    #[test]
    fn test_equal_key_and_length_prefers_smaller_last_node() {
        assert!(node(&[0, 3, 1], 4) > node(&[0, 1, 2], 4));
    }

    #[test]
    fn test_full_tie_prefers_lexicographically_smaller_path() {
        let a = node(&[0, 1, 2, 0], 11);
        let b = node(&[0, 2, 1, 0], 11);
        assert!(a > b);
        assert_ne!(a, b);
        assert_eq!(a, node(&[0, 1, 2, 0], 11));
    }

    #[test]
    #[should_panic(expected = "called `SearchNode::new` with an empty path")]
    fn test_empty_path_is_rejected() {
        let _ = SearchNode::<i64>::new(SearchPath::new(), 0, 0);
    }
}
