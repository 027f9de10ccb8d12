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

//! Ordered-extraction containers for search nodes.
//!
//! The best-first engine only needs to push nodes and pop the one that
//! orders first (see `node` for the order). `Frontier` captures that, and
//! `HeapFrontier` implements it on top of a binary heap.

use crate::node::SearchNode;
use std::collections::BinaryHeap;

/// A container that always yields its first-ordered node next.
pub trait Frontier<T> {
    /// Inserts a node.
    fn push(&mut self, node: SearchNode<T>);
    /// Removes and returns the node that orders first, if any.
    fn pop(&mut self) -> Option<SearchNode<T>>;
    /// Returns the number of queued nodes.
    fn len(&self) -> usize;
    /// Removes all queued nodes, keeping allocated capacity.
    fn clear(&mut self);

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A `Frontier` backed by `std::collections::BinaryHeap`.
#[derive(Clone, Debug)]
pub struct HeapFrontier<T>
where
    T: Ord + Copy,
{
    heap: BinaryHeap<SearchNode<T>>,
}

impl<T> Default for HeapFrontier<T>
where
    T: Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HeapFrontier<T>
where
    T: Ord + Copy,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Returns the node that would be popped next without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&SearchNode<T>> {
        self.heap.peek()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }
}

impl<T> Frontier<T> for HeapFrontier<T>
where
    T: Ord + Copy,
{
    #[inline]
    fn push(&mut self, node: SearchNode<T>) {
        self.heap.push(node);
    }

    #[inline]
    fn pop(&mut self) -> Option<SearchNode<T>> {
        self.heap.pop()
    }

    #[inline]
    fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SearchPath;
    use waypoint_model::index::NodeIndex;

    fn node(ids: &[usize], key: i64) -> SearchNode<i64> {
        let path: SearchPath = ids.iter().copied().map(NodeIndex::new).collect();
        SearchNode::new(path, key, key)
    }

    fn drain(frontier: &mut HeapFrontier<i64>) -> Vec<(i64, Vec<usize>)> {
        std::iter::from_fn(|| frontier.pop())
            .map(|n| (n.key(), n.path().iter().map(|p| p.get()).collect()))
            .collect()
    }

    #[test]
    fn test_pops_in_documented_order() {
        let mut frontier = HeapFrontier::with_capacity(8);
        frontier.push(node(&[0, 2], 9));
        frontier.push(node(&[0, 1], 4));
        frontier.push(node(&[0, 3, 1], 4));
        frontier.push(node(&[0, 1, 3], 4));
        frontier.push(node(&[0, 3], 4));
        assert_eq!(frontier.len(), 5);
        assert_eq!(frontier.peek().map(|n| n.key()), Some(4));

        assert_eq!(
            drain(&mut frontier),
            vec![
                (4, vec![0, 3, 1]),
                (4, vec![0, 1, 3]),
                (4, vec![0, 1]),
                (4, vec![0, 3]),
                (9, vec![0, 2]),
            ]
        );
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let nodes = [
            node(&[0, 2, 1, 0], 11),
            node(&[0, 1, 2, 0], 11),
            node(&[0, 2], 11),
        ];

        let mut forward = HeapFrontier::new();
        nodes.iter().cloned().for_each(|n| forward.push(n));
        let mut backward = HeapFrontier::new();
        nodes.iter().rev().cloned().for_each(|n| backward.push(n));

        let a = drain(&mut forward);
        assert_eq!(a, drain(&mut backward));
        assert_eq!(a[0].1, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut frontier = HeapFrontier::with_capacity(16);
        frontier.push(node(&[0], 0));
        frontier.clear();
        assert!(frontier.is_empty());
        assert!(frontier.capacity() >= 16);
    }
}
