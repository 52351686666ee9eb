//! Search result types and statistics

use crate::ir::{Problem, Ratio, Tree};
use std::fmt;
use std::time::Duration;

/// The best network found so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestRecord {
    /// Deep copy; shares nothing with the tabulator
    pub tree: Tree,
    pub resistance: Ratio,
    pub cost: Ratio,
    /// Restart (0-based) that produced it
    pub restart: u64,
    /// Wall-clock time since the search started
    pub elapsed: Duration,
}

impl BestRecord {
    /// Human-readable description of the network and how close it gets
    pub fn summary(&self, problem: &Problem) -> String {
        let mut s = String::new();
        s.push_str(&format!("  Network: {}\n", self.tree.render(problem)));
        s.push_str(&format!("  Slots: {}\n", self.tree));
        s.push_str(&format!(
            "  Resistance: {} ({:.6})\n",
            self.resistance,
            self.resistance.to_f64()
        ));
        s.push_str(&format!(
            "  Target: {} ({:.6})\n",
            problem.target(),
            problem.target().to_f64()
        ));
        s.push_str(&format!(
            "  Cost: {} ({:.6e})\n",
            self.cost,
            self.cost.to_f64()
        ));
        s
    }
}

/// Why the restart loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TimeLimit,
    RestartLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::TimeLimit => write!(f, "time limit reached"),
            StopReason::RestartLimit => write!(f, "restart limit reached"),
        }
    }
}

/// Statistics from a search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Total time spent searching
    pub elapsed_time: Duration,
    /// Completed restarts
    pub restarts: u64,
    /// Improving local steps across all restarts
    pub improvement_steps: u64,
    /// binary_search / linear_search calls
    pub tabulator_queries: u64,
    /// Number of times the best record was replaced
    pub improvements_found: u64,
    /// Expandables created across all restarts
    pub expandables: u64,
    /// Cost of the best record
    pub best_cost: Option<Ratio>,
}

impl SearchStatistics {
    /// Restarts per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.restarts as f64 / secs
        }
    }

    /// Average number of improving steps per restart
    pub fn mean_steps(&self) -> f64 {
        if self.restarts == 0 {
            0.0
        } else {
            self.improvement_steps as f64 / self.restarts as f64
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!("Restarts: {}\n", self.restarts));
        s.push_str(&format!("Throughput: {:.1} restarts/sec\n", self.throughput()));
        s.push_str(&format!(
            "Improving steps: {} ({:.2} per restart)\n",
            self.improvement_steps,
            self.mean_steps()
        ));
        s.push_str(&format!("Tabulator queries: {}\n", self.tabulator_queries));
        s.push_str(&format!("Expandables: {}\n", self.expandables));
        s.push_str(&format!("Improvements found: {}\n", self.improvements_found));
        match &self.best_cost {
            Some(cost) => s.push_str(&format!("Best cost found: {}\n", cost)),
            None => s.push_str("Best cost found: none\n"),
        }
        s
    }
}

/// Result of a bounded [`solve`](crate::search::LocalSolver::solve)
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub best: Option<BestRecord>,
    /// Cost of every new best, in the order found
    pub history: Vec<Ratio>,
    pub statistics: SearchStatistics,
    pub stop_reason: StopReason,
}
