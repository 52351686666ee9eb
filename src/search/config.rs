//! Configuration types for the local search driver

use std::time::{Duration, Instant};

/// Seed used when none is given, so single runs are reproducible
pub const DEFAULT_SEED: u64 = 2022;

/// Configuration for [`LocalSolver`](crate::search::LocalSolver)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Seed for the pseudorandom source
    pub seed: u64,
    /// Stop once this much wall-clock time has passed (None = never)
    pub time_limit: Option<Duration>,
    /// Stop after this many restarts (None = never)
    pub max_restarts: Option<u64>,
    /// Largest slot group collapsed into an expandable (None = tabulator arity)
    pub arity: Option<usize>,
    /// Report every restart at info level, not only new bests
    pub verbose: bool,
    /// Instant elapsed times and the time limit count from (None = when
    /// `solve` is called)
    pub start: Option<Instant>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            time_limit: None,
            max_restarts: None,
            arity: None,
            verbose: false,
            start: None,
        }
    }
}

impl SolverConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_time_limit_option(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_max_restarts(mut self, restarts: u64) -> Self {
        self.max_restarts = Some(restarts);
        self
    }

    pub fn with_max_restarts_option(mut self, restarts: Option<u64>) -> Self {
        self.max_restarts = restarts;
        self
    }

    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Count elapsed time from `start`, e.g. process start, so that work
    /// done before the search (tabulation) is included
    pub fn with_start(mut self, start: Instant) -> Self {
        self.start = Some(start);
        self
    }

    /// True when neither limit is set and the search runs until killed
    pub fn is_unbounded(&self) -> bool {
        self.time_limit.is_none() && self.max_restarts.is_none()
    }
}
