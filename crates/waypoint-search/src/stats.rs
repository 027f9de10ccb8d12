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

use std::time::Duration;
use waypoint_core::num::ops::saturating_arithmetic::SaturatingAddVal;

/// Statistics collected during one run of a tour strategy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchStatistics {
    /// Partial paths taken off the frontier (or construction steps taken).
    pub nodes_expanded: u64,
    /// Partial paths created and scored.
    pub nodes_generated: u64,
    /// Largest number of partial paths held by the frontier at once.
    pub max_frontier: u64,
    /// Complete tours whose cost was computed.
    pub tours_evaluated: u64,
    /// Tours that improved on the best known cost when they were found.
    pub solutions_found: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_node_expanded(&mut self) {
        self.nodes_expanded = self.nodes_expanded.saturating_add_val(1);
    }

    #[inline]
    pub fn on_node_generated(&mut self) {
        self.nodes_generated = self.nodes_generated.saturating_add_val(1);
    }

    #[inline]
    pub fn on_frontier_size(&mut self, size: usize) {
        self.max_frontier = self.max_frontier.max(size as u64);
    }

    #[inline]
    pub fn on_tour_evaluated(&mut self) {
        self.tours_evaluated = self.tours_evaluated.saturating_add_val(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add_val(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes expanded:   {}", self.nodes_expanded)?;
        writeln!(f, "  Nodes generated:  {}", self.nodes_generated)?;
        writeln!(f, "  Max frontier:     {}", self.max_frontier)?;
        writeln!(f, "  Tours evaluated:  {}", self.tours_evaluated)?;
        writeln!(f, "  Solutions found:  {}", self.solutions_found)?;
        writeln!(f, "  Total time:       {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SearchStatistics;
    use std::time::Duration;

    #[test]
    fn test_counters_accumulate() {
        let mut stats = SearchStatistics::default();
        stats.on_node_expanded();
        stats.on_node_expanded();
        stats.on_node_generated();
        stats.on_tour_evaluated();
        stats.on_solution_found();

        assert_eq!(stats.nodes_expanded, 2);
        assert_eq!(stats.nodes_generated, 1);
        assert_eq!(stats.tours_evaluated, 1);
        assert_eq!(stats.solutions_found, 1);
    }

    #[test]
    fn test_frontier_tracks_maximum() {
        let mut stats = SearchStatistics::default();
        stats.on_frontier_size(4);
        stats.on_frontier_size(9);
        stats.on_frontier_size(2);
        assert_eq!(stats.max_frontier, 9);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = SearchStatistics {
            nodes_expanded: u64::MAX,
            ..SearchStatistics::default()
        };
        stats.on_node_expanded();
        assert_eq!(stats.nodes_expanded, u64::MAX);
    }

    #[test]
    fn test_display_formats_all_fields() {
        let mut stats = SearchStatistics {
            nodes_expanded: 12,
            nodes_generated: 30,
            max_frontier: 7,
            tours_evaluated: 3,
            solutions_found: 1,
            ..SearchStatistics::default()
        };
        stats.set_total_time(Duration::from_millis(1500));

        let rendered = format!("{}", stats);
        assert!(rendered.contains("Search Statistics:"), "missing header");
        assert!(rendered.contains("Nodes expanded:   12"));
        assert!(rendered.contains("Nodes generated:  30"));
        assert!(rendered.contains("Max frontier:     7"));
        assert!(rendered.contains("Tours evaluated:  3"));
        assert!(rendered.contains("Solutions found:  1"));
        assert!(rendered.contains("Total time:       1.50s"));
    }
}
