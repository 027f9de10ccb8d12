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

//! Square cost matrices.
//!
//! `CostMatrix<T>` stores `N * N` non-negative travel costs in row-major
//! order, where entry `(i, j)` is the cost of travelling directly from node
//! `i` to node `j`. The diagonal is never traversed by a tour of two or more
//! nodes and is kept as supplied. Matrices need not be symmetric.
//!
//! All constructors validate their input, so a `CostMatrix` that exists is
//! always non-empty, square and free of negative entries. Strategies can
//! therefore rely on the shape without re-checking it.

use crate::index::NodeIndex;
use num_traits::{FromPrimitive, PrimInt, Signed};
use waypoint_core::num::ops::saturating_arithmetic::SaturatingAddVal;

/// The error type for constructing and querying cost matrices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// The matrix has no nodes at all.
    #[error("cost matrix must contain at least one node")]
    Empty,
    /// A row does not have as many entries as there are rows.
    #[error("cost matrix is not square: row {row} has {found} entries but {expected} were expected")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A flat buffer does not hold exactly `N * N` entries.
    #[error("flat cost buffer has {found} entries but {expected} were expected")]
    WrongLength { expected: usize, found: usize },
    /// A travel cost is below zero.
    #[error("cost from node {from} to node {to} is negative")]
    NegativeCost { from: usize, to: usize },
    /// The matrix was required to be symmetric but is not.
    #[error("cost matrix is not symmetric at ({from}, {to})")]
    Asymmetric { from: usize, to: usize },
    /// A derived cost cannot be represented by the cost type.
    #[error("cost from node {from} to node {to} cannot be represented by the cost type")]
    Unrepresentable { from: usize, to: usize },
    /// A path refers to a node that does not exist.
    #[error("node index {index} is out of range for a matrix with {num_nodes} nodes")]
    IndexOutOfRange { index: usize, num_nodes: usize },
}

/// A validated, immutable `N x N` matrix of travel costs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMatrix<T> {
    num_nodes: usize,
    costs: Vec<T>,
}

impl<T> CostMatrix<T>
where
    T: PrimInt + Signed + SaturatingAddVal,
{
    /// Builds a matrix from nested rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let num_nodes = rows.len();
        if num_nodes == 0 {
            return Err(MatrixError::Empty);
        }

        let mut costs = Vec::with_capacity(num_nodes * num_nodes);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != num_nodes {
                return Err(MatrixError::NotSquare {
                    row: row_index,
                    expected: num_nodes,
                    found: row.len(),
                });
            }
            costs.extend(row);
        }

        Self::validated(num_nodes, costs)
    }

    /// Builds a matrix from a row-major buffer of `num_nodes * num_nodes` costs.
    pub fn from_flat(num_nodes: usize, costs: Vec<T>) -> Result<Self, MatrixError> {
        if num_nodes == 0 {
            return Err(MatrixError::Empty);
        }

        let expected = num_nodes.saturating_mul(num_nodes);
        if costs.len() != expected {
            return Err(MatrixError::WrongLength {
                expected,
                found: costs.len(),
            });
        }

        Self::validated(num_nodes, costs)
    }

    /// Builds the Euclidean distance matrix between planar points.
    ///
    /// Every distance is multiplied by `scale` and rounded to the nearest
    /// integer, so a `scale` of `100.0` keeps two decimal places.
    pub fn from_points(points: &[(f64, f64)], scale: f64) -> Result<Self, MatrixError>
    where
        T: FromPrimitive,
    {
        let num_nodes = points.len();
        if num_nodes == 0 {
            return Err(MatrixError::Empty);
        }

        let mut costs = Vec::with_capacity(num_nodes * num_nodes);
        for (from, &(x1, y1)) in points.iter().enumerate() {
            for (to, &(x2, y2)) in points.iter().enumerate() {
                let distance = ((x2 - x1).hypot(y2 - y1) * scale).round();
                let cost =
                    T::from_f64(distance).ok_or(MatrixError::Unrepresentable { from, to })?;
                costs.push(cost);
            }
        }

        Self::validated(num_nodes, costs)
    }

    #[inline]
    fn validated(num_nodes: usize, costs: Vec<T>) -> Result<Self, MatrixError> {
        debug_assert_eq!(costs.len(), num_nodes * num_nodes);

        if let Some(position) = costs.iter().position(|c| c.is_negative()) {
            return Err(MatrixError::NegativeCost {
                from: position / num_nodes,
                to: position % num_nodes,
            });
        }

        Ok(Self { num_nodes, costs })
    }
}

impl<T> CostMatrix<T>
where
    T: Copy + Ord,
{
    /// Returns the number of nodes `N`, including the depot.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns all node indices in ascending order.
    #[inline]
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = NodeIndex> + ExactSizeIterator {
        NodeIndex::range(self.num_nodes)
    }

    /// Returns the cost of travelling directly from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is not within `0..self.num_nodes()`.
    #[inline]
    pub fn cost(&self, from: NodeIndex, to: NodeIndex) -> T {
        let (from, to) = (from.get(), to.get());
        assert!(
            from < self.num_nodes && to < self.num_nodes,
            "called `CostMatrix::cost` with node index out of bounds: the len is {} but the indices are ({}, {})",
            self.num_nodes,
            from,
            to
        );

        self.costs[from * self.num_nodes + to]
    }

    /// Returns the outgoing costs of a node as a slice indexed by target node.
    ///
    /// # Panics
    ///
    /// Panics if `from` is not within `0..self.num_nodes()`.
    #[inline]
    pub fn row(&self, from: NodeIndex) -> &[T] {
        let start = from.get() * self.num_nodes;
        &self.costs[start..start + self.num_nodes]
    }

    /// Returns the cheaper direction of the edge between `a` and `b`.
    #[inline]
    pub fn undirected_cost(&self, a: NodeIndex, b: NodeIndex) -> T {
        self.cost(a, b).min(self.cost(b, a))
    }

    /// Returns the first `(i, j)` with `i < j` whose two directions differ.
    pub fn first_asymmetry(&self) -> Option<(NodeIndex, NodeIndex)> {
        for i in 0..self.num_nodes {
            for j in (i + 1)..self.num_nodes {
                if self.costs[i * self.num_nodes + j] != self.costs[j * self.num_nodes + i] {
                    return Some((NodeIndex::new(i), NodeIndex::new(j)));
                }
            }
        }
        None
    }

    /// Returns `true` if `cost(i, j) == cost(j, i)` for every pair of nodes.
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.first_asymmetry().is_none()
    }
}

impl<T> CostMatrix<T>
where
    T: PrimInt + Signed + SaturatingAddVal,
{
    /// Sums the costs of consecutive edges along `path`.
    ///
    /// Paths with fewer than two nodes cost zero. The sum saturates at
    /// `T::max_value()`.
    ///
    /// # Panics
    ///
    /// Panics if `path` contains an index outside `0..self.num_nodes()`.
    /// Use [`CostMatrix::try_path_cost`] for paths from untrusted sources.
    #[inline]
    pub fn path_cost(&self, path: &[NodeIndex]) -> T {
        path.windows(2).fold(T::zero(), |acc, edge| {
            acc.saturating_add_val(self.cost(edge[0], edge[1]))
        })
    }

    /// Like [`CostMatrix::path_cost`], but reports an out-of-range node as an error.
    pub fn try_path_cost(&self, path: &[NodeIndex]) -> Result<T, MatrixError> {
        if let Some(bad) = path.iter().find(|n| n.get() >= self.num_nodes) {
            return Err(MatrixError::IndexOutOfRange {
                index: bad.get(),
                num_nodes: self.num_nodes,
            });
        }
        Ok(self.path_cost(path))
    }
}

impl<T> std::fmt::Display for CostMatrix<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CostMatrix ({} nodes)", self.num_nodes)?;
        for row in self.costs.chunks(self.num_nodes) {
            let line = row
                .iter()
                .map(|c| format!("{:>6}", c))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}
