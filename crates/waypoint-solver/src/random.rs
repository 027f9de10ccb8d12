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

//! Seeded random tours.
//!
//! Shuffles the nodes `1..N` and closes the result at the depot. Useful as a
//! baseline for the other strategies. The same seed always yields the same
//! tour on the same matrix.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use waypoint_model::{index::DEPOT, matrix::CostMatrix, tour::Tour};
use waypoint_search::{
    monitor::search_monitor::SearchMonitor, num::SolverNumeric, result::SolverOutcome,
    solver::TourSolver, stats::SearchStatistics,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomTourSolver {
    seed: u64,
}

impl RandomTourSolver {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<T> TourSolver<T> for RandomTourSolver
where
    T: SolverNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "RandomTour"
    }

    fn solve_monitored(
        &mut self,
        matrix: &CostMatrix<T>,
        monitor: &mut dyn SearchMonitor<T>,
    ) -> SolverOutcome<T> {
        let start_time = std::time::Instant::now();
        let mut stats = SearchStatistics::default();
        monitor.on_enter_search(matrix, &stats);

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut interior: Vec<_> = matrix.nodes().skip(1).collect();
        interior.shuffle(&mut rng);

        let mut path = Vec::with_capacity(interior.len() + 2);
        path.push(DEPOT);
        path.extend(interior);
        path.push(DEPOT);
        stats.on_tour_evaluated();

        let tour = Tour::new(path, matrix).unwrap_or_else(|e| {
            panic!("called `RandomTourSolver::solve` and produced an invalid tour: {e}")
        });
        stats.on_solution_found();
        monitor.on_solution_found(&tour, &stats);

        stats.set_total_time(start_time.elapsed());
        monitor.on_exit_search(&stats);
        log::debug!("RandomTour(seed={}): tour cost {}", self.seed, tour.cost());

        SolverOutcome::heuristic(tour, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;

    fn random_matrix(n: usize, seed: u64) -> CostMatrix<i64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let costs = (0..n * n).map(|_| rng.gen_range(0..100)).collect();
        CostMatrix::from_flat(n, costs).unwrap()
    }

    #[test]
    fn test_same_seed_same_tour() {
        let m = random_matrix(9, 3);
        let a = RandomTourSolver::new(17).solve(&m);
        let b = RandomTourSolver::new(17).solve(&m);
        assert_eq!(a.tour(), b.tour());
        assert!(!a.is_optimal());
    }

    #[test]
    fn test_tour_is_valid() {
        let m = random_matrix(12, 5);
        for seed in 0..8 {
            let outcome = RandomTourSolver::new(seed).solve(&m);
            let mut ids = outcome.tour().to_ids();
            assert_eq!(ids.len(), 13);
            assert_eq!(ids.first(), Some(&0));
            assert_eq!(ids.last(), Some(&0));
            ids.pop();
            ids.sort_unstable();
            assert_eq!(ids, (0..12).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_single_node() {
        let m = CostMatrix::<i64>::from_rows(vec![vec![0]]).unwrap();
        assert_eq!(RandomTourSolver::default().solve(&m).tour().to_ids(), vec![0, 0]);
    }
}
