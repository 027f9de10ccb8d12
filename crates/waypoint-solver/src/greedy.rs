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

//! Greedy nearest-neighbor construction.
//!
//! From the depot, repeatedly move to the cheapest unvisited node, scanning
//! candidates in ascending id order so the smallest id wins a tie. Once every
//! node is visited the tour returns to the depot. `O(N^2)`, no backtracking,
//! no optimality guarantee.

use fixedbitset::FixedBitSet;
use waypoint_model::{index::DEPOT, index::NodeIndex, matrix::CostMatrix, tour::Tour};
use waypoint_search::{
    monitor::search_monitor::SearchMonitor, num::SolverNumeric, result::SolverOutcome,
    solver::TourSolver, stats::SearchStatistics,
};

#[derive(Clone, Debug, Default)]
pub struct GreedyNearestNeighborSolver {
    visited: FixedBitSet,
}

impl GreedyNearestNeighborSolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn preallocated(num_nodes: usize) -> Self {
        Self {
            visited: FixedBitSet::with_capacity(num_nodes),
        }
    }

    /// Returns the cheapest unvisited successor of `from`, smallest id first on ties.
    fn nearest<T>(&self, matrix: &CostMatrix<T>, from: NodeIndex) -> Option<(NodeIndex, T)>
    where
        T: SolverNumeric,
    {
        let mut best: Option<(NodeIndex, T)> = None;
        for to in matrix.nodes() {
            if self.visited.contains(to.get()) {
                continue;
            }
            let cost = matrix.cost(from, to);
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((to, cost));
            }
        }
        best
    }
}

impl<T> TourSolver<T> for GreedyNearestNeighborSolver
where
    T: SolverNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "GreedyNearestNeighbor"
    }

    fn solve_monitored(
        &mut self,
        matrix: &CostMatrix<T>,
        monitor: &mut dyn SearchMonitor<T>,
    ) -> SolverOutcome<T> {
        let start_time = std::time::Instant::now();
        let num_nodes = matrix.num_nodes();
        let mut stats = SearchStatistics::default();
        monitor.on_enter_search(matrix, &stats);

        self.visited.clear();
        self.visited.grow(num_nodes);
        self.visited.insert(DEPOT.get());

        let mut path = Vec::with_capacity(num_nodes + 1);
        path.push(DEPOT);
        let mut cost = T::zero();
        let mut current = DEPOT;

        while let Some((next, step)) = self.nearest(matrix, current) {
            stats.on_node_expanded();
            monitor.on_node_expanded(&path, cost, &stats);

            self.visited.insert(next.get());
            path.push(next);
            cost = cost.saturating_add_val(step);
            current = next;
        }
        path.push(DEPOT);
        stats.on_tour_evaluated();

        let tour = Tour::new(path, matrix).unwrap_or_else(|e| {
            panic!("called `GreedyNearestNeighborSolver::solve` and produced an invalid tour: {e}")
        });
        stats.on_solution_found();
        monitor.on_solution_found(&tour, &stats);

        stats.set_total_time(start_time.elapsed());
        monitor.on_exit_search(&stats);
        log::debug!("GreedyNearestNeighbor: tour cost {}", tour.cost());

        SolverOutcome::heuristic(tour, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_scenario() {
        let m = CostMatrix::<i64>::from_rows(vec![vec![0, 1, 9], vec![1, 0, 1], vec![9, 1, 0]])
            .unwrap();
        let outcome = GreedyNearestNeighborSolver::new().solve(&m);
        assert!(!outcome.is_optimal());
        assert_eq!(outcome.tour().to_ids(), vec![0, 1, 2, 0]);
        assert_eq!(outcome.cost(), 11);
        assert_eq!(outcome.statistics().nodes_expanded, 2);
    }

    #[test]
    fn test_ties_go_to_smallest_id() {
        let m = CostMatrix::<i64>::from_rows(vec![
            vec![0, 5, 2, 2],
            vec![5, 0, 3, 3],
            vec![2, 3, 0, 1],
            vec![2, 3, 1, 0],
        ])
        .unwrap();
        let outcome = GreedyNearestNeighborSolver::new().solve(&m);
        assert_eq!(outcome.tour().to_ids(), vec![0, 2, 3, 1, 0]);
        assert_eq!(outcome.cost(), 2 + 1 + 3 + 5);
    }

    #[test]
    fn test_greedy_can_miss_the_optimum() {
        // The cheap first hop to 3 forces the expensive 2 -> 0 edge at the end.
        let m = CostMatrix::<i64>::from_rows(vec![
            vec![0, 5, 9, 3],
            vec![5, 0, 5, 8],
            vec![9, 5, 0, 8],
            vec![3, 8, 8, 0],
        ])
        .unwrap();
        let outcome = GreedyNearestNeighborSolver::new().solve(&m);
        assert_eq!(outcome.tour().to_ids(), vec![0, 3, 1, 2, 0]);
        assert_eq!(outcome.cost(), 25);
        // 0 -> 1 -> 2 -> 3 -> 0 costs 21.
        assert!(outcome.cost() > 21);
    }

    #[test]
    fn test_single_and_two_nodes() {
        let one = CostMatrix::<i64>::from_rows(vec![vec![0]]).unwrap();
        assert_eq!(
            GreedyNearestNeighborSolver::new().solve(&one).tour().to_ids(),
            vec![0, 0]
        );

        let two = CostMatrix::<i64>::from_rows(vec![vec![0, 4], vec![6, 0]]).unwrap();
        let outcome = GreedyNearestNeighborSolver::preallocated(2).solve(&two);
        assert_eq!(outcome.tour().to_ids(), vec![0, 1, 0]);
        assert_eq!(outcome.cost(), 10);
    }
}
