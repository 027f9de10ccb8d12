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

//! Best-first tour search.
//!
//! `BestFirstSolver` runs one state machine over a frontier of partial paths,
//! always expanding the path that orders first (see `node`). Let `N` be the
//! number of nodes and `len` the length of the popped path:
//!
//! - `len < N`: push one child per unvisited node, queued under
//!   `cost + bound.estimate_remaining(child)`;
//! - `len == N`: push the single child that closes the tour at the depot,
//!   queued under its plain cost;
//! - `len == N + 1`: the popped path is a closed tour, and it is optimal.
//!
//! With `ZeroLowerBound` every key is the plain path cost, which is the
//! classic branch-and-bound. With `MstLowerBound` the engine is A*. Both are
//! exact as long as the bound is admissible and edge costs are non-negative.
//! For `N == 1` the root `[0]` already has length `N`, so the first step
//! closes it and the search returns `[0, 0]`.
//!
//! Nothing caps the frontier. Both variants are exponential in the worst
//! case; the MST bound usually keeps A* usable well past the point where
//! plain branch-and-bound runs out of memory.

use crate::{
    eval::{
        bound::{LowerBound, ZeroLowerBound},
        mst::MstLowerBound,
    },
    frontier::{Frontier, HeapFrontier},
    node::SearchNode,
};
use fixedbitset::FixedBitSet;
use waypoint_model::{index::DEPOT, matrix::CostMatrix, tour::Tour};
use waypoint_search::{
    monitor::search_monitor::SearchMonitor, num::SolverNumeric, result::SolverOutcome,
    solver::TourSolver, stats::SearchStatistics,
};

/// Best-first search with plain path cost as the key.
pub type BranchAndBoundSolver<T> = BestFirstSolver<T, ZeroLowerBound, HeapFrontier<T>>;

/// Best-first search keyed by path cost plus the MST lower bound.
pub type AStarSolver<T> = BestFirstSolver<T, MstLowerBound<T>, HeapFrontier<T>>;

/// A reusable best-first search engine.
///
/// The solver owns its frontier, its bound and the visited-node scratch set,
/// so repeated solves reuse their allocations. Nothing is carried over from
/// one solve to the next.
#[derive(Clone, Debug)]
pub struct BestFirstSolver<T, B, F = HeapFrontier<T>>
where
    T: SolverNumeric,
{
    name: &'static str,
    bound: B,
    frontier: F,
    visited: FixedBitSet,
    _marker: std::marker::PhantomData<T>,
}

impl<T> BestFirstSolver<T, ZeroLowerBound, HeapFrontier<T>>
where
    T: SolverNumeric,
{
    /// Creates the uninformed variant.
    #[inline]
    pub fn new() -> Self {
        Self::with_parts("BranchAndBound", ZeroLowerBound, HeapFrontier::new())
    }

    /// Creates the uninformed variant with scratch space for `num_nodes` nodes.
    ///
    /// The frontier is not preallocated; its peak size depends on the matrix.
    #[inline]
    pub fn preallocated(num_nodes: usize) -> Self {
        let mut solver = Self::new();
        solver.visited.grow(num_nodes);
        solver
    }
}

impl<T> Default for BestFirstSolver<T, ZeroLowerBound, HeapFrontier<T>>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BestFirstSolver<T, MstLowerBound<T>, HeapFrontier<T>>
where
    T: SolverNumeric,
{
    /// Creates the A* variant.
    #[inline]
    pub fn new() -> Self {
        Self::with_parts("InformedBestFirst", MstLowerBound::new(), HeapFrontier::new())
    }

    /// Creates the A* variant with scratch space for `num_nodes` nodes.
    #[inline]
    pub fn preallocated(num_nodes: usize) -> Self {
        let mut solver = Self::with_parts(
            "InformedBestFirst",
            MstLowerBound::preallocated(num_nodes),
            HeapFrontier::new(),
        );
        solver.visited.grow(num_nodes);
        solver
    }
}

impl<T> Default for BestFirstSolver<T, MstLowerBound<T>, HeapFrontier<T>>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B, F> BestFirstSolver<T, B, F>
where
    T: SolverNumeric,
    B: LowerBound<T>,
    F: Frontier<T>,
{
    /// Assembles a solver from a bound and a frontier.
    ///
    /// The result is only exact if `bound` never overestimates the remaining
    /// cost of a path.
    #[inline]
    pub fn with_parts(name: &'static str, bound: B, frontier: F) -> Self {
        Self {
            name,
            bound,
            frontier,
            visited: FixedBitSet::new(),
            _marker: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn bound(&self) -> &B {
        &self.bound
    }

    #[inline]
    pub fn frontier(&self) -> &F {
        &self.frontier
    }

    fn reset(&mut self) {
        self.frontier.clear();
        self.visited.clear();
    }
}

impl<T, B, F> TourSolver<T> for BestFirstSolver<T, B, F>
where
    T: SolverNumeric,
    B: LowerBound<T>,
    F: Frontier<T>,
{
    #[inline]
    fn name(&self) -> &str {
        self.name
    }

    fn solve_monitored(
        &mut self,
        matrix: &CostMatrix<T>,
        monitor: &mut dyn SearchMonitor<T>,
    ) -> SolverOutcome<T> {
        self.reset();
        let outcome = BestFirstSearchSession::new(self, matrix, monitor).run();
        self.reset();
        outcome
    }
}

/// The state of one solve.
struct BestFirstSearchSession<'a, T, B, F>
where
    T: SolverNumeric,
{
    solver: &'a mut BestFirstSolver<T, B, F>,
    matrix: &'a CostMatrix<T>,
    monitor: &'a mut dyn SearchMonitor<T>,
    stats: SearchStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, B, F> std::fmt::Debug for BestFirstSearchSession<'a, T, B, F>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestFirstSearchSession")
            .field("solver", &self.solver.name)
            .field("num_nodes", &self.matrix.num_nodes())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, B, F> BestFirstSearchSession<'a, T, B, F>
where
    T: SolverNumeric,
    B: LowerBound<T>,
    F: Frontier<T>,
{
    #[inline]
    fn new(
        solver: &'a mut BestFirstSolver<T, B, F>,
        matrix: &'a CostMatrix<T>,
        monitor: &'a mut dyn SearchMonitor<T>,
    ) -> Self {
        Self {
            solver,
            matrix,
            monitor,
            stats: SearchStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> SolverOutcome<T> {
        let num_nodes = self.matrix.num_nodes();
        log::debug!(
            "{}: searching {} nodes with {}",
            self.solver.name,
            num_nodes,
            self.solver.bound.name()
        );
        self.monitor.on_enter_search(self.matrix, &self.stats);

        self.solver.visited.grow(num_nodes);
        self.push(SearchNode::root());

        loop {
            let Some(node) = self.solver.frontier.pop() else {
                // A valid matrix always has a closing tour, and every path
                // shorter than N + 1 has at least one child.
                panic!("called `BestFirstSolver::solve` with an exhausted frontier");
            };

            self.stats.on_node_expanded();
            self.monitor
                .on_node_expanded(node.path(), node.key(), &self.stats);
            log::trace!(
                "{}: expand len={} cost={} key={}",
                self.solver.name,
                node.len(),
                node.cost(),
                node.key()
            );

            if node.len() < num_nodes {
                self.expand(&node);
            } else if node.len() == num_nodes {
                self.close(&node);
            } else {
                debug_assert_eq!(node.len(), num_nodes + 1);
                return self.finish(node);
            }
        }
    }

    /// Pushes one child per node not yet on `node`'s path.
    fn expand(&mut self, node: &SearchNode<T>) {
        let last = node.last();

        self.solver.visited.clear();
        for &visited in node.path() {
            self.solver.visited.insert(visited.get());
        }

        for next in self.matrix.nodes() {
            if self.solver.visited.contains(next.get()) {
                continue;
            }

            let cost = node
                .cost()
                .saturating_add_val(self.matrix.cost(last, next));
            let child = node.extend(next, cost, cost);
            let estimate = self
                .solver
                .bound
                .estimate_remaining(self.matrix, child.path());
            let key = cost.saturating_add_val(estimate);
            self.push(SearchNode::new(child.into_path(), cost, key));
        }
    }

    /// Pushes the tour that returns from `node`'s last node to the depot.
    fn close(&mut self, node: &SearchNode<T>) {
        let cost = node
            .cost()
            .saturating_add_val(self.matrix.cost(node.last(), DEPOT));
        self.stats.on_tour_evaluated();
        self.push(node.extend(DEPOT, cost, cost));
    }

    #[inline]
    fn push(&mut self, node: SearchNode<T>) {
        self.stats.on_node_generated();
        self.solver.frontier.push(node);
        self.stats.on_frontier_size(self.solver.frontier.len());
    }

    fn finish(mut self, node: SearchNode<T>) -> SolverOutcome<T> {
        let tour = Tour::new(node.into_path().into_vec(), self.matrix).unwrap_or_else(|e| {
            panic!("called `BestFirstSolver::solve` and produced an invalid tour: {e}")
        });

        self.stats.on_solution_found();
        self.monitor.on_solution_found(&tour, &self.stats);

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        log::debug!(
            "{}: optimal cost {} after {} expansions",
            self.solver.name,
            tour.cost(),
            self.stats.nodes_expanded
        );

        SolverOutcome::optimal(tour, self.stats)
    }
}
