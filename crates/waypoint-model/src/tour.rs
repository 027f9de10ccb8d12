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

//! Validated closed tours.
//!
//! A `Tour<T>` is the output contract of every strategy: `N + 1` node ids
//! that start and end at the depot and visit every other node exactly once.
//! The cost is computed once on construction and cached.

use crate::{
    index::{DEPOT, NodeIndex},
    matrix::CostMatrix,
};
use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed};
use waypoint_core::num::ops::saturating_arithmetic::SaturatingAddVal;

/// Reasons a node sequence is not a valid closed tour.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TourError {
    /// The sequence does not contain exactly `N + 1` nodes.
    #[error("tour has {found} nodes but {expected} were expected")]
    WrongLength { expected: usize, found: usize },
    /// The sequence does not start and end at the depot.
    #[error("tour must start and end at node 0, but runs from node {first} to node {last}")]
    NotAnchored { first: usize, last: usize },
    /// The sequence refers to a node that does not exist.
    #[error("node index {index} is out of range for a matrix with {num_nodes} nodes")]
    IndexOutOfRange { index: usize, num_nodes: usize },
    /// A node is visited more than once.
    #[error("node {index} is visited more than once")]
    Duplicate { index: usize },
}

/// A closed tour over all nodes of a cost matrix, together with its cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour<T> {
    nodes: Vec<NodeIndex>,
    cost: T,
}

impl<T> Tour<T>
where
    T: PrimInt + Signed + SaturatingAddVal,
{
    /// Validates `nodes` against `matrix` and computes the tour cost.
    pub fn new(nodes: Vec<NodeIndex>, matrix: &CostMatrix<T>) -> Result<Self, TourError> {
        validate(&nodes, matrix.num_nodes())?;
        let cost = matrix.path_cost(&nodes);
        Ok(Self { nodes, cost })
    }

    /// Builds a tour from raw node ids.
    #[inline]
    pub fn from_ids<I>(ids: I, matrix: &CostMatrix<T>) -> Result<Self, TourError>
    where
        I: IntoIterator<Item = usize>,
    {
        Self::new(ids.into_iter().map(NodeIndex::new).collect(), matrix)
    }
}

impl<T> Tour<T>
where
    T: Copy,
{
    /// Returns the total travel cost of the tour.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Returns the visiting sequence, including the depot at both ends.
    #[inline]
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Returns the number of entries in the visiting sequence (`N + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a valid tour holds at least `[0, 0]`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the visiting sequence as raw node ids.
    #[inline]
    pub fn to_ids(&self) -> Vec<usize> {
        self.nodes.iter().map(|n| n.get()).collect()
    }

    /// Consumes the tour and returns its visiting sequence.
    #[inline]
    pub fn into_nodes(self) -> Vec<NodeIndex> {
        self.nodes
    }

    /// Iterates over the directed edges `(from, to)` of the tour.
    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Checks `nodes` against the closed-tour contract for a matrix of `num_nodes` nodes.
pub fn validate(nodes: &[NodeIndex], num_nodes: usize) -> Result<(), TourError> {
    let expected = num_nodes + 1;
    if nodes.len() != expected {
        return Err(TourError::WrongLength {
            expected,
            found: nodes.len(),
        });
    }

    let (first, last) = (nodes[0], nodes[nodes.len() - 1]);
    if first != DEPOT || last != DEPOT {
        return Err(TourError::NotAnchored {
            first: first.get(),
            last: last.get(),
        });
    }

    // The closing depot is the only repeat allowed.
    let mut seen = FixedBitSet::with_capacity(num_nodes);
    for node in &nodes[..nodes.len() - 1] {
        let index = node.get();
        if index >= num_nodes {
            return Err(TourError::IndexOutOfRange { index, num_nodes });
        }
        if seen.put(index) {
            return Err(TourError::Duplicate { index });
        }
    }

    Ok(())
}

impl<T> std::fmt::Display for Tour<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let route = self
            .nodes
            .iter()
            .map(|n| n.get().to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        write!(f, "Tour(cost: {}): {}", self.cost, route)
    }
}
