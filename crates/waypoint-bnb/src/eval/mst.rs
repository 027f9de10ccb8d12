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

//! Minimum spanning tree lower bound.
//!
//! For a partial path `p`, the nodes that still need connecting are every
//! node not strictly inside `p`: the unvisited nodes plus the two endpoints
//! `p[0]` and `p[last]`. Any completion of `p` is a Hamiltonian path over
//! exactly that set, and a Hamiltonian path is a spanning tree, so the MST
//! over the set can never exceed the completion cost.
//!
//! The tree is built with Prim's algorithm in `O(k^2)` for `k` members.
//! Edges are treated as undirected with weight `min(c[i][j], c[j][i])`; on a
//! symmetric matrix this is the plain edge cost, and on an asymmetric one it
//! keeps the bound admissible whichever direction the completion travels.

use crate::eval::bound::LowerBound;
use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed};
use waypoint_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use waypoint_model::{index::NodeIndex, matrix::CostMatrix};

/// MST lower bound with reusable scratch buffers.
#[derive(Clone, Debug, Default)]
pub struct MstLowerBound<T> {
    /// Nodes spanned by the tree.
    members: Vec<NodeIndex>,
    /// `distance[i]`: cheapest edge from the tree to `members[i]`.
    distance: Vec<T>,
    /// Positions in `members` already attached to the tree.
    in_tree: FixedBitSet,
    /// Node ids strictly inside the current path.
    interior: FixedBitSet,
}

impl<T> MstLowerBound<T>
where
    T: PrimInt + Signed + SaturatingAddVal,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            distance: Vec::new(),
            in_tree: FixedBitSet::new(),
            interior: FixedBitSet::new(),
        }
    }

    /// Creates a bound whose buffers already fit `num_nodes` nodes.
    #[inline]
    pub fn preallocated(num_nodes: usize) -> Self {
        Self {
            members: Vec::with_capacity(num_nodes),
            distance: Vec::with_capacity(num_nodes),
            in_tree: FixedBitSet::with_capacity(num_nodes),
            interior: FixedBitSet::with_capacity(num_nodes),
        }
    }

    /// Computes the MST cost over the nodes not strictly inside `path`.
    pub fn compute(&mut self, matrix: &CostMatrix<T>, path: &[NodeIndex]) -> T {
        let num_nodes = matrix.num_nodes();

        self.interior.clear();
        self.interior.grow(num_nodes);
        if let (Some(&first), Some(&last)) = (path.first(), path.last()) {
            for &node in path {
                if node != first && node != last {
                    self.interior.insert(node.get());
                }
            }
        }

        self.members.clear();
        self.members.extend(
            matrix
                .nodes()
                .filter(|node| !self.interior.contains(node.get())),
        );

        self.prim(matrix)
    }

    fn prim(&mut self, matrix: &CostMatrix<T>) -> T {
        let k = self.members.len();
        if k <= 1 {
            return T::zero();
        }

        let root = self.members[0];
        self.in_tree.clear();
        self.in_tree.grow(k);
        self.in_tree.insert(0);

        self.distance.clear();
        self.distance.extend(
            self.members
                .iter()
                .map(|&node| matrix.undirected_cost(root, node)),
        );

        let mut total = T::zero();
        for _ in 1..k {
            let mut next: Option<usize> = None;
            for i in 0..k {
                if self.in_tree.contains(i) {
                    continue;
                }
                if next.is_none_or(|best| self.distance[i] < self.distance[best]) {
                    next = Some(i);
                }
            }

            let Some(next) = next else {
                unreachable!("called `MstLowerBound::prim` with every member already attached");
            };

            total = total.saturating_add_val(self.distance[next]);
            self.in_tree.insert(next);

            let attached = self.members[next];
            for i in 0..k {
                if self.in_tree.contains(i) {
                    continue;
                }
                let weight = matrix.undirected_cost(attached, self.members[i]);
                if weight < self.distance[i] {
                    self.distance[i] = weight;
                }
            }
        }

        total
    }
}

impl<T> LowerBound<T> for MstLowerBound<T>
where
    T: PrimInt + Signed + SaturatingAddVal,
{
    #[inline]
    fn name(&self) -> &str {
        "MstLowerBound"
    }

    #[inline]
    fn estimate_remaining(&mut self, matrix: &CostMatrix<T>, path: &[NodeIndex]) -> T {
        self.compute(matrix, path)
    }
}

/// Computes the MST lower bound for `path` with fresh scratch buffers.
pub fn mst_lower_bound<T>(matrix: &CostMatrix<T>, path: &[NodeIndex]) -> T
where
    T: PrimInt + Signed + SaturatingAddVal,
{
    MstLowerBound::preallocated(matrix.num_nodes()).compute(matrix, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use proptest::prelude::*;

    fn path(ids: &[usize]) -> Vec<NodeIndex> {
        ids.iter().copied().map(NodeIndex::new).collect()
    }

    fn line3() -> CostMatrix<i64> {
        CostMatrix::from_rows(vec![vec![0, 1, 9], vec![1, 0, 1], vec![9, 1, 0]]).unwrap()
    }

    /// Cheapest way to visit every node missing from `prefix` and return to the depot.
    fn brute_force_completion(matrix: &CostMatrix<i64>, prefix: &[NodeIndex]) -> i64 {
        let last = *prefix.last().unwrap();
        let remaining: Vec<NodeIndex> = matrix.nodes().filter(|n| !prefix.contains(n)).collect();
        let k = remaining.len();

        remaining
            .into_iter()
            .permutations(k)
            .map(|order| {
                let mut tail = vec![last];
                tail.extend(order);
                tail.push(NodeIndex::new(0));
                matrix.path_cost(&tail)
            })
            .min()
            .unwrap()
    }

    #[test]
    fn test_root_spans_every_node() {
        assert_eq!(mst_lower_bound(&line3(), &path(&[0])), 2);
    }

    #[test]
    fn test_endpoints_stay_in_the_tree() {
        let m = line3();
        assert_eq!(mst_lower_bound(&m, &path(&[0, 1])), 2);
        assert_eq!(mst_lower_bound(&m, &path(&[0, 2])), 2);
        // Node 1 is interior, leaving only the 0-2 edge.
        assert_eq!(mst_lower_bound(&m, &path(&[0, 1, 2])), 9);
    }

    #[test]
    fn test_single_member_costs_nothing() {
        let single = CostMatrix::<i64>::from_rows(vec![vec![0]]).unwrap();
        assert_eq!(mst_lower_bound(&single, &path(&[0])), 0);
        assert_eq!(mst_lower_bound(&line3(), &path(&[0, 1, 2, 0])), 0);
    }

    #[test]
    fn test_asymmetric_edges_use_cheaper_direction() {
        let m = CostMatrix::<i64>::from_rows(vec![
            vec![0, 1, 50],
            vec![50, 0, 1],
            vec![1, 50, 0],
        ])
        .unwrap();
        let bound = mst_lower_bound(&m, &path(&[0]));
        assert_eq!(bound, 2);
        assert!(bound <= brute_force_completion(&m, &path(&[0])));
    }

    #[test]
    fn test_scratch_buffers_are_reusable() {
        let m = line3();
        let mut bound = MstLowerBound::new();
        assert_eq!(bound.compute(&m, &path(&[0, 1, 2])), 9);
        assert_eq!(bound.compute(&m, &path(&[0])), 2);
        assert_eq!(bound.estimate_remaining(&m, &path(&[0, 1, 2])), 9);
    }

    fn instance() -> impl Strategy<Value = (usize, Vec<i64>, Vec<usize>, usize)> {
        (1usize..=6).prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(0i64..100, n * n),
                Just((1..n).collect::<Vec<usize>>()).prop_shuffle(),
                0..n,
            )
        })
    }

    proptest! {
        #[test]
        fn prop_bound_never_exceeds_best_completion((n, costs, order, visited) in instance()) {
            let matrix = CostMatrix::from_flat(n, costs).unwrap();
            let mut prefix = vec![NodeIndex::new(0)];
            prefix.extend(order[..visited].iter().copied().map(NodeIndex::new));

            let bound = mst_lower_bound(&matrix, &prefix);
            let best = brute_force_completion(&matrix, &prefix);
            prop_assert!(
                bound <= best,
                "bound {} exceeds completion {} for {:?}",
                bound,
                best,
                prefix
            );
        }
    }
}
