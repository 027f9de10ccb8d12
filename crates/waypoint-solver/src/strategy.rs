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

//! Runtime strategy selection.
//!
//! `Strategy` names every tour strategy in the workspace and turns into a
//! boxed `TourSolver` on demand, so callers can pick one from configuration
//! or a command line string:
//!
//! ```text
//! exhaustive | greedy | branch-and-bound (bnb) | astar (a*) | random[:seed]
//! ```

use crate::{
    exhaustive::ExhaustiveSolver, greedy::GreedyNearestNeighborSolver, random::RandomTourSolver,
};
use std::str::FromStr;
use waypoint_bnb::bnb::{AStarSolver, BranchAndBoundSolver};
use waypoint_model::matrix::{CostMatrix, MatrixError};
use waypoint_search::{
    monitor::search_monitor::SearchMonitor, num::SolverNumeric, result::SolverOutcome,
    solver::TourSolver,
};

/// The error type for parsing a `Strategy` name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrategyParseError {
    #[error(
        "unknown strategy `{0}`, expected one of exhaustive, greedy, branch-and-bound, astar, random[:seed]"
    )]
    Unknown(String),
    #[error("invalid random seed `{value}`: {source}")]
    InvalidSeed {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// A tour strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Every permutation, cheapest first found. Exact.
    Exhaustive,
    /// Nearest unvisited neighbor. Heuristic.
    Greedy,
    /// Best-first search keyed by path cost. Exact.
    BranchAndBound,
    /// Best-first search keyed by path cost plus the MST bound. Exact.
    #[default]
    AStar,
    /// A seeded random permutation. Heuristic.
    Random { seed: u64 },
}

impl Strategy {
    /// The strategies that always return an optimal tour.
    pub const EXACT: [Strategy; 3] = [
        Strategy::Exhaustive,
        Strategy::BranchAndBound,
        Strategy::AStar,
    ];

    /// Returns `true` if the strategy always returns an optimal tour.
    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(
            self,
            Strategy::Exhaustive | Strategy::BranchAndBound | Strategy::AStar
        )
    }

    /// Creates a solver for this strategy.
    pub fn build<T>(&self) -> Box<dyn TourSolver<T>>
    where
        T: SolverNumeric + 'static,
    {
        match *self {
            Strategy::Exhaustive => Box::new(ExhaustiveSolver::new()),
            Strategy::Greedy => Box::new(GreedyNearestNeighborSolver::new()),
            Strategy::BranchAndBound => Box::new(BranchAndBoundSolver::<T>::new()),
            Strategy::AStar => Box::new(AStarSolver::<T>::new()),
            Strategy::Random { seed } => Box::new(RandomTourSolver::new(seed)),
        }
    }

    /// Creates a solver whose scratch space already fits `num_nodes` nodes.
    pub fn build_preallocated<T>(&self, num_nodes: usize) -> Box<dyn TourSolver<T>>
    where
        T: SolverNumeric + 'static,
    {
        match *self {
            Strategy::Exhaustive => Box::new(ExhaustiveSolver::preallocated(num_nodes)),
            Strategy::Greedy => Box::new(GreedyNearestNeighborSolver::preallocated(num_nodes)),
            Strategy::BranchAndBound => {
                Box::new(BranchAndBoundSolver::<T>::preallocated(num_nodes))
            }
            Strategy::AStar => Box::new(AStarSolver::<T>::preallocated(num_nodes)),
            Strategy::Random { seed } => Box::new(RandomTourSolver::new(seed)),
        }
    }

    /// Solves `matrix` with a freshly built solver.
    pub fn solve<T>(&self, matrix: &CostMatrix<T>) -> SolverOutcome<T>
    where
        T: SolverNumeric + 'static,
    {
        self.build_preallocated(matrix.num_nodes()).solve(matrix)
    }

    /// Solves `matrix` with a freshly built solver, reporting to `monitor`.
    pub fn solve_monitored<T>(
        &self,
        matrix: &CostMatrix<T>,
        monitor: &mut dyn SearchMonitor<T>,
    ) -> SolverOutcome<T>
    where
        T: SolverNumeric + 'static,
    {
        self.build_preallocated(matrix.num_nodes())
            .solve_monitored(matrix, monitor)
    }
}

/// Validates `rows` as a cost matrix and solves it with `strategy`.
///
/// Malformed input is rejected before any search state is built, so an
/// `Err` here never carries a partial tour.
pub fn solve_rows<T>(strategy: Strategy, rows: Vec<Vec<T>>) -> Result<SolverOutcome<T>, MatrixError>
where
    T: SolverNumeric + 'static,
{
    let matrix = CostMatrix::from_rows(rows)?;
    Ok(strategy.solve(&matrix))
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Exhaustive => write!(f, "exhaustive"),
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::BranchAndBound => write!(f, "branch-and-bound"),
            Strategy::AStar => write!(f, "astar"),
            Strategy::Random { seed } => write!(f, "random:{}", seed),
        }
    }
}

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "exhaustive" => Ok(Strategy::Exhaustive),
            "greedy" => Ok(Strategy::Greedy),
            "branch-and-bound" | "bnb" => Ok(Strategy::BranchAndBound),
            "astar" | "a*" => Ok(Strategy::AStar),
            "random" => Ok(Strategy::Random { seed: 0 }),
            other => match other.strip_prefix("random:") {
                Some(seed) => seed
                    .parse()
                    .map(|seed| Strategy::Random { seed })
                    .map_err(|source| StrategyParseError::InvalidSeed {
                        value: seed.to_string(),
                        source,
                    }),
                None => Err(StrategyParseError::Unknown(s.trim().to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{ProptestConfig, prop, prop_assert, prop_assert_eq, proptest};
    use proptest::strategy::Strategy as _;
    use waypoint_search::monitor::{
        composite::CompositeMonitor, log::LogMonitor, no_op::NoOperationMonitor,
    };

    const LINE3: [[i64; 3]; 3] = [[0, 1, 9], [1, 0, 1], [9, 1, 0]];

    fn line3_rows() -> Vec<Vec<i64>> {
        LINE3.iter().map(|row| row.to_vec()).collect()
    }

    fn all_strategies() -> [Strategy; 5] {
        [
            Strategy::Exhaustive,
            Strategy::Greedy,
            Strategy::BranchAndBound,
            Strategy::AStar,
            Strategy::Random { seed: 9 },
        ]
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("exhaustive".parse(), Ok(Strategy::Exhaustive));
        assert_eq!(" Greedy ".parse(), Ok(Strategy::Greedy));
        assert_eq!("bnb".parse(), Ok(Strategy::BranchAndBound));
        assert_eq!("A*".parse(), Ok(Strategy::AStar));
        assert_eq!("random".parse(), Ok(Strategy::Random { seed: 0 }));
        assert_eq!("random:42".parse(), Ok(Strategy::Random { seed: 42 }));
    }

    #[test]
    fn test_display_parses_back() {
        for strategy in all_strategies() {
            assert_eq!(strategy.to_string().parse(), Ok(strategy));
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "dijkstra".parse::<Strategy>(),
            Err(StrategyParseError::Unknown("dijkstra".to_string()))
        );
        let err = "random:abc".parse::<Strategy>().unwrap_err();
        assert!(matches!(err, StrategyParseError::InvalidSeed { ref value, .. } if value == "abc"));
        assert!(err.to_string().starts_with("invalid random seed `abc`"));
    }

    #[test]
    fn test_exactness() {
        assert!(Strategy::EXACT.iter().all(Strategy::is_exact));
        assert!(!Strategy::Greedy.is_exact());
        assert!(!Strategy::Random { seed: 1 }.is_exact());
        assert_eq!(Strategy::default(), Strategy::AStar);
    }

    #[test]
    fn test_every_strategy_on_concrete_scenario() {
        for strategy in Strategy::EXACT.into_iter().chain([Strategy::Greedy]) {
            let outcome = solve_rows(strategy, line3_rows()).unwrap();
            assert_eq!(outcome.tour().to_ids(), vec![0, 1, 2, 0], "{}", strategy);
            assert_eq!(outcome.cost(), 11, "{}", strategy);
            assert_eq!(outcome.is_optimal(), strategy.is_exact());
        }
    }

    #[test]
    fn test_every_strategy_on_single_node() {
        for strategy in all_strategies() {
            let outcome = solve_rows(strategy, vec![vec![0i64]]).unwrap();
            assert_eq!(outcome.tour().to_ids(), vec![0, 0], "{}", strategy);
            assert_eq!(outcome.cost(), 0);
        }
    }

    #[test]
    fn test_malformed_rows_are_rejected() {
        for strategy in all_strategies() {
            assert_eq!(
                solve_rows::<i64>(strategy, vec![]).unwrap_err(),
                MatrixError::Empty
            );
            assert_eq!(
                solve_rows(strategy, vec![vec![0i64, 1], vec![1]]).unwrap_err(),
                MatrixError::NotSquare {
                    row: 1,
                    expected: 2,
                    found: 1
                }
            );
            assert_eq!(
                solve_rows(strategy, vec![vec![0i64, -1], vec![1, 0]]).unwrap_err(),
                MatrixError::NegativeCost { from: 0, to: 1 }
            );
        }
    }

    #[test]
    fn test_build_reports_names() {
        let names: Vec<String> = all_strategies()
            .iter()
            .map(|s| s.build::<i32>().name().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "ExhaustiveSearch",
                "GreedyNearestNeighbor",
                "BranchAndBound",
                "InformedBestFirst",
                "RandomTour"
            ]
        );
    }

    #[test]
    fn test_monitored_solve() {
        let matrix = CostMatrix::from_rows(line3_rows()).unwrap();

        let mut log_monitor = LogMonitor::<i64>::default();
        let outcome = Strategy::AStar.solve_monitored(&matrix, &mut log_monitor);
        assert_eq!(log_monitor.best_cost(), Some(outcome.cost()));

        let mut composite = CompositeMonitor::with_capacity(2);
        composite.add_monitor(LogMonitor::<i64>::default());
        composite.add_monitor(NoOperationMonitor::<i64>::new());
        let outcome = Strategy::Exhaustive.solve_monitored(&matrix, &mut composite);
        assert_eq!(outcome.cost(), 11);
        assert_eq!(composite.len(), 2);
    }

    #[test]
    fn test_exact_strategies_agree_on_seeded_eight_node_matrices() {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..10 {
            let costs = (0..64).map(|_| rng.gen_range(0i64..100)).collect();
            let matrix = CostMatrix::from_flat(8, costs).unwrap();
            let optimum = Strategy::Exhaustive.solve(&matrix).cost();
            assert_eq!(Strategy::BranchAndBound.solve(&matrix).cost(), optimum);
            assert_eq!(Strategy::AStar.solve(&matrix).cost(), optimum);
        }
    }

    fn matrix_strategy(
        max_nodes: usize,
    ) -> impl proptest::strategy::Strategy<Value = CostMatrix<i64>> {
        (1usize..=max_nodes).prop_flat_map(|n| {
            prop::collection::vec(0i64..60, n * n)
                .prop_map(move |costs| CostMatrix::from_flat(n, costs).unwrap())
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_every_tour_is_valid(matrix in matrix_strategy(7)) {
            let n = matrix.num_nodes();
            for strategy in all_strategies() {
                let outcome = strategy.solve(&matrix);
                let ids = outcome.tour().to_ids();
                prop_assert_eq!(ids.len(), n + 1);
                prop_assert_eq!(ids[0], 0);
                prop_assert_eq!(ids[n], 0);
                let mut interior = ids[1..n].to_vec();
                interior.sort_unstable();
                prop_assert_eq!(interior, (1..n).collect::<Vec<_>>());
                prop_assert_eq!(outcome.cost(), matrix.path_cost(outcome.tour().nodes()));
            }
        }

        #[test]
        fn prop_heuristics_never_beat_the_optimum(matrix in matrix_strategy(7)) {
            let optimum = Strategy::Exhaustive.solve(&matrix).cost();
            let greedy = Strategy::Greedy.solve(&matrix).cost();
            let random = Strategy::Random { seed: 3 }.solve(&matrix).cost();
            prop_assert!(greedy >= optimum);
            prop_assert!(random >= optimum);
            if matrix.num_nodes() <= 2 {
                prop_assert_eq!(greedy, optimum);
            }
        }

        #[test]
        fn prop_repeated_solves_are_identical(matrix in matrix_strategy(7)) {
            for strategy in all_strategies() {
                let first = strategy.solve(&matrix);
                let second = strategy.solve(&matrix);
                prop_assert_eq!(first.tour().nodes(), second.tour().nodes());
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_exact_strategies_agree(matrix in matrix_strategy(8)) {
            let costs: Vec<i64> = Strategy::EXACT
                .iter()
                .map(|s| s.solve(&matrix).cost())
                .collect();
            prop_assert!(costs.iter().all(|&c| c == costs[0]), "{:?}", costs);
        }
    }
}
