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

//! Exhaustive permutation search.
//!
//! Enumerates every ordering of the nodes `1..N` in lexicographic order,
//! closes each at the depot and keeps the first strictly cheapest one. This
//! is `O((N-1)!)` and only practical for single-digit `N`; its role is a
//! correctness oracle for the other strategies.

use itertools::Itertools;
use waypoint_model::{index::DEPOT, index::NodeIndex, matrix::CostMatrix, tour::Tour};
use waypoint_search::{
    monitor::search_monitor::SearchMonitor, num::SolverNumeric, result::SolverOutcome,
    solver::TourSolver, stats::SearchStatistics,
};

/// Node count past which a run is logged as likely impractical.
pub const PRACTICAL_NODE_LIMIT: usize = 11;

/// Tries every tour and returns the cheapest.
#[derive(Clone, Debug, Default)]
pub struct ExhaustiveSolver {
    candidate: Vec<NodeIndex>,
    best: Vec<NodeIndex>,
}

impl ExhaustiveSolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver whose buffers already fit a tour over `num_nodes` nodes.
    #[inline]
    pub fn preallocated(num_nodes: usize) -> Self {
        Self {
            candidate: Vec::with_capacity(num_nodes + 1),
            best: Vec::with_capacity(num_nodes + 1),
        }
    }
}

impl<T> TourSolver<T> for ExhaustiveSolver
where
    T: SolverNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "ExhaustiveSearch"
    }

    fn solve_monitored(
        &mut self,
        matrix: &CostMatrix<T>,
        monitor: &mut dyn SearchMonitor<T>,
    ) -> SolverOutcome<T> {
        let start_time = std::time::Instant::now();
        let num_nodes = matrix.num_nodes();
        let mut stats = SearchStatistics::default();

        if num_nodes > PRACTICAL_NODE_LIMIT {
            log::warn!(
                "ExhaustiveSearch: {} nodes is past the practical limit of {}",
                num_nodes,
                PRACTICAL_NODE_LIMIT
            );
        }
        monitor.on_enter_search(matrix, &stats);

        let mut best_cost: Option<T> = None;
        for order in matrix.nodes().skip(1).permutations(num_nodes - 1) {
            self.candidate.clear();
            self.candidate.push(DEPOT);
            self.candidate.extend(order);
            self.candidate.push(DEPOT);

            let cost = matrix.path_cost(&self.candidate);
            stats.on_node_expanded();
            stats.on_tour_evaluated();
            monitor.on_node_expanded(&self.candidate, cost, &stats);

            if best_cost.is_none_or(|best| cost < best) {
                best_cost = Some(cost);
                std::mem::swap(&mut self.best, &mut self.candidate);
                stats.on_solution_found();

                let tour = Tour::new(self.best.clone(), matrix).unwrap_or_else(|e| {
                    panic!("called `ExhaustiveSolver::solve` and produced an invalid tour: {e}")
                });
                log::trace!("ExhaustiveSearch: improved to {}", tour.cost());
                monitor.on_solution_found(&tour, &stats);
            }
        }

        let tour = Tour::new(std::mem::take(&mut self.best), matrix).unwrap_or_else(|e| {
            panic!("called `ExhaustiveSolver::solve` and produced an invalid tour: {e}")
        });

        stats.set_total_time(start_time.elapsed());
        monitor.on_exit_search(&stats);
        log::debug!(
            "ExhaustiveSearch: optimal cost {} over {} tours",
            tour.cost(),
            stats.tours_evaluated
        );

        SolverOutcome::optimal(tour, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line3() -> CostMatrix<i64> {
        CostMatrix::from_rows(vec![vec![0, 1, 9], vec![1, 0, 1], vec![9, 1, 0]]).unwrap()
    }

    #[test]
    fn test_first_minimum_in_lexicographic_order_wins() {
        let outcome = ExhaustiveSolver::new().solve(&line3());
        assert!(outcome.is_optimal());
        assert_eq!(outcome.tour().to_ids(), vec![0, 1, 2, 0]);
        assert_eq!(outcome.cost(), 11);
        assert_eq!(outcome.statistics().tours_evaluated, 2);
        assert_eq!(outcome.statistics().solutions_found, 1);
    }

    #[test]
    fn test_single_node() {
        let m = CostMatrix::<i64>::from_rows(vec![vec![0]]).unwrap();
        let outcome = ExhaustiveSolver::new().solve(&m);
        assert_eq!(outcome.tour().to_ids(), vec![0, 0]);
        assert_eq!(outcome.cost(), 0);
        assert_eq!(outcome.statistics().tours_evaluated, 1);
    }

    #[test]
    fn test_finds_unique_optimum() {
        // 0 -> 2 -> 1 -> 3 -> 0 costs 4, every other tour costs more.
        let m = CostMatrix::<i64>::from_rows(vec![
            vec![0, 9, 1, 9],
            vec![9, 0, 9, 1],
            vec![9, 1, 0, 9],
            vec![1, 9, 9, 0],
        ])
        .unwrap();
        let outcome = ExhaustiveSolver::preallocated(4).solve(&m);
        assert_eq!(outcome.tour().to_ids(), vec![0, 2, 1, 3, 0]);
        assert_eq!(outcome.cost(), 4);
        assert_eq!(outcome.statistics().tours_evaluated, 6);
    }

    #[test]
    fn test_solver_is_reusable() {
        let mut solver = ExhaustiveSolver::new();
        let first = solver.solve(&line3());
        let second = solver.solve(&line3());
        assert_eq!(first.tour(), second.tour());
    }
}
