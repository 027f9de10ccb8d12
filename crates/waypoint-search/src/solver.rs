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

//! The tour-solving capability.
//!
//! Every strategy, exact or heuristic, implements `TourSolver<T>`: given a
//! validated cost matrix, return a closed tour that starts and ends at the
//! depot and visits every other node exactly once. The trait is object safe
//! so callers can pick a strategy at runtime (`Box<dyn TourSolver<T>>`).

use crate::{
    monitor::{no_op::NoOperationMonitor, search_monitor::SearchMonitor},
    num::SolverNumeric,
    result::SolverOutcome,
};
use waypoint_model::matrix::CostMatrix;

pub trait TourSolver<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the strategy.
    fn name(&self) -> &str;

    /// Runs the strategy to completion, reporting progress to `monitor`.
    fn solve_monitored(
        &mut self,
        matrix: &CostMatrix<T>,
        monitor: &mut dyn SearchMonitor<T>,
    ) -> SolverOutcome<T>;

    /// Runs the strategy to completion without observation.
    fn solve(&mut self, matrix: &CostMatrix<T>) -> SolverOutcome<T> {
        let mut monitor = NoOperationMonitor::new();
        self.solve_monitored(matrix, &mut monitor)
    }
}

impl<T> std::fmt::Debug for dyn TourSolver<T> + '_
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TourSolver({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TourSolver<T> + '_
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TourSolver({})", self.name())
    }
}
