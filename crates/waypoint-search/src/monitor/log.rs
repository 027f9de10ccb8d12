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

//! Progress reporting through the `log` facade.
//!
//! `LogMonitor` prints a header when the search starts, a throttled progress
//! line while it runs, and a summary when it ends. The clock is only read
//! when `nodes_expanded & clock_check_mask == 0`, which keeps the per-node
//! overhead to a single bitwise test.

use crate::{monitor::search_monitor::SearchMonitor, stats::SearchStatistics};
use num_traits::{PrimInt, Signed};
use std::time::{Duration, Instant};
use waypoint_model::{index::NodeIndex, matrix::CostMatrix, tour::Tour};

const RULE_WIDTH: usize = 78;

#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_cost: Option<T>,
    lines_logged: u64,
}

impl<T> LogMonitor<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_cost: None,
            lines_logged: 0,
        }
    }

    /// Returns the cost of the best tour reported so far.
    #[inline]
    pub fn best_cost(&self) -> Option<T> {
        self.best_cost
    }

    /// Returns the number of progress lines emitted during the last search.
    #[inline]
    pub fn lines_logged(&self) -> u64 {
        self.lines_logged
    }

    fn log_header(&self, num_nodes: usize) {
        log::info!("Searching tour over {} nodes", num_nodes);
        log::info!(
            "{:<9} | {:<12} | {:<12} | {:<9} | {:<7} | {:<12}",
            "Elapsed",
            "Expanded",
            "Generated",
            "Frontier",
            "Depth",
            "Best Tour"
        );
        log::info!("{}", "-".repeat(RULE_WIDTH));
    }

    fn log_line(&mut self, depth: usize, key: T, stats: &SearchStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best = match self.best_cost {
            Some(cost) => cost.to_string(),
            None => "Inf".to_string(),
        };

        log::info!(
            "{:<9} | {:<12} | {:<12} | {:<9} | {:<7} | {:<12}",
            format!("{:.1}s", elapsed),
            stats.nodes_expanded,
            stats.nodes_generated,
            stats.max_frontier,
            depth,
            best
        );
        log::trace!("current key {}", key);

        self.lines_logged += 1;
        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {:?}, clock_check_mask: {})",
            self.log_interval, self.clock_check_mask
        )
    }
}

impl<T> SearchMonitor<T> for LogMonitor<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, matrix: &CostMatrix<T>, _statistics: &SearchStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_cost = None;
        self.lines_logged = 0;
        self.log_header(matrix.num_nodes());
    }

    fn on_node_expanded(&mut self, path: &[NodeIndex], key: T, statistics: &SearchStatistics) {
        if (statistics.nodes_expanded & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(path.len(), key, statistics);
        }
    }

    fn on_solution_found(&mut self, tour: &Tour<T>, _statistics: &SearchStatistics) {
        self.best_cost = Some(tour.cost());
        log::debug!("New best {}", tour);
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        log::info!("{}", "-".repeat(RULE_WIDTH));
        log::info!(
            "Search finished: {} nodes expanded, {} generated in {:.2?}",
            statistics.nodes_expanded,
            statistics.nodes_generated,
            statistics.time_total
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> CostMatrix<i64> {
        CostMatrix::from_rows(vec![vec![0, 3], vec![3, 0]]).unwrap()
    }

    #[test]
    fn test_zero_interval_logs_on_mask_hits_only() {
        let mut monitor = LogMonitor::<i64>::new(Duration::ZERO, 1);
        let m = matrix();
        let mut stats = SearchStatistics::default();
        monitor.on_enter_search(&m, &stats);

        let path = [NodeIndex::new(0)];
        for _ in 0..4 {
            stats.on_node_expanded();
            monitor.on_node_expanded(&path, 0, &stats);
        }

        // Expansion counts 2 and 4 satisfy `count & 1 == 0`.
        assert_eq!(monitor.lines_logged(), 2);
    }

    #[test]
    fn test_long_interval_suppresses_progress_lines() {
        let mut monitor = LogMonitor::<i64>::new(Duration::from_secs(3600), 0);
        let m = matrix();
        let stats = SearchStatistics::default();
        monitor.on_enter_search(&m, &stats);
        monitor.on_node_expanded(&[NodeIndex::new(0)], 0, &stats);
        assert_eq!(monitor.lines_logged(), 0);
    }

    #[test]
    fn test_tracks_best_cost_and_resets_on_enter() {
        let mut monitor = LogMonitor::<i64>::default();
        let m = matrix();
        let stats = SearchStatistics::default();
        let tour = Tour::from_ids([0, 1, 0], &m).unwrap();

        monitor.on_enter_search(&m, &stats);
        monitor.on_solution_found(&tour, &stats);
        assert_eq!(monitor.best_cost(), Some(6));

        monitor.on_exit_search(&stats);
        monitor.on_enter_search(&m, &stats);
        assert_eq!(monitor.best_cost(), None);
    }

    #[test]
    fn test_display_reports_configuration() {
        let monitor = LogMonitor::<i64>::new(Duration::from_millis(250), 1023);
        assert_eq!(
            format!("{}", monitor),
            "LogMonitor(log_interval: 250ms, clock_check_mask: 1023)"
        );
    }
}
