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

use crate::stats::SearchStatistics;
use waypoint_model::tour::Tour;

/// The tour a strategy produced, tagged with what is known about its quality.
///
/// There is no aborted or partial variant: a strategy either runs to
/// completion or panics on an internal fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// The strategy proved that no cheaper tour exists.
    Optimal(Tour<T>),
    /// The strategy produced a valid tour without an optimality guarantee.
    Heuristic(Tour<T>),
}

impl<T> SolverResult<T> {
    /// Returns the tour regardless of its quality tag.
    #[inline]
    pub fn tour(&self) -> &Tour<T> {
        match self {
            SolverResult::Optimal(tour) | SolverResult::Heuristic(tour) => tour,
        }
    }

    /// Consumes the result and returns its tour.
    #[inline]
    pub fn into_tour(self) -> Tour<T> {
        match self {
            SolverResult::Optimal(tour) | SolverResult::Heuristic(tour) => tour,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverResult::Optimal(_))
    }
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Optimal(tour) => write!(f, "Optimal(cost={})", tour.cost()),
            SolverResult::Heuristic(tour) => write!(f, "Heuristic(cost={})", tour.cost()),
        }
    }
}

/// Result of one strategy run, together with the statistics it collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome<T> {
    result: SolverResult<T>,
    statistics: SearchStatistics,
}

impl<T> SolverOutcome<T> {
    #[inline]
    pub fn new(result: SolverResult<T>, statistics: SearchStatistics) -> Self {
        Self { result, statistics }
    }

    #[inline]
    pub fn optimal(tour: Tour<T>, statistics: SearchStatistics) -> Self {
        Self::new(SolverResult::Optimal(tour), statistics)
    }

    #[inline]
    pub fn heuristic(tour: Tour<T>, statistics: SearchStatistics) -> Self {
        Self::new(SolverResult::Heuristic(tour), statistics)
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns the produced tour.
    #[inline]
    pub fn tour(&self) -> &Tour<T> {
        self.result.tour()
    }

    #[inline]
    pub fn into_tour(self) -> Tour<T> {
        self.result.into_tour()
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.result.is_optimal()
    }
}

impl<T> SolverOutcome<T>
where
    T: Copy,
{
    /// Returns the cost of the produced tour.
    #[inline]
    pub fn cost(&self) -> T {
        self.tour().cost()
    }
}

impl<T> std::fmt::Display for SolverOutcome<T>
where
    T: Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.result)?;
        writeln!(f, "{}", self.result.tour())?;
        write!(f, "{}", self.statistics)
    }
}
