//! Restart driver for the local search
//!
//! Each restart builds a fresh random tree over a shuffled slot order,
//! hill-climbs it with the tabulator, and keeps a deep copy whenever the
//! result beats every earlier restart. The loop is anytime: every new best
//! is written to the output sink as soon as it is found.

use crate::error::SearchError;
use crate::ir::{Problem, Ratio, Tree, Value};
use crate::search::config::SolverConfig;
use crate::search::local::expand::randomly_expand;
use crate::search::local::improve::iteratively_improve;
use crate::search::result::{BestRecord, SearchStatistics, SolveResult, StopReason};
use crate::semantics::cost::{evaluate_cost, tree_resistance};
use crate::tabulator::Tabulator;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

/// Randomized restart search over series/parallel trees
pub struct LocalSolver<'t, T: Tabulator + ?Sized, R: Rng> {
    tabulator: &'t T,
    rng: R,
    config: SolverConfig,
    arity: usize,
    best: Option<BestRecord>,
    history: Vec<Ratio>,
    statistics: SearchStatistics,
}

impl<'t, T: Tabulator + ?Sized> LocalSolver<'t, T, ChaCha8Rng> {
    /// Solver driven by ChaCha8 seeded from `config.seed`
    pub fn seeded(tabulator: &'t T, config: SolverConfig) -> Result<Self, SearchError> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::new(tabulator, rng, config)
    }
}

impl<'t, T: Tabulator + ?Sized, R: Rng> LocalSolver<'t, T, R> {
    pub fn new(tabulator: &'t T, rng: R, config: SolverConfig) -> Result<Self, SearchError> {
        let arity = config.arity.unwrap_or_else(|| tabulator.arity());
        if arity == 0 {
            return Err(SearchError::InvalidProblem(
                "expansion arity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            tabulator,
            rng,
            config,
            arity,
            best: None,
            history: Vec::new(),
            statistics: SearchStatistics::default(),
        })
    }

    /// Largest slot group turned into an expandable
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn best(&self) -> Option<&BestRecord> {
        self.best.as_ref()
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Run restarts until a stop predicate fires.
    ///
    /// Every strictly better network is written to `out` as a
    /// "Found after S seconds:" line followed by its summary, timed from
    /// the configured start instant. Ties keep the earlier network. With no limits configured this never returns
    /// unless an error occurs.
    ///
    /// # Errors
    /// `InvalidProblem` if the problem does not match the tabulator's slot
    /// count, `TabulatorMiss` from expansion or improvement, `Output` if
    /// `out` cannot be written.
    pub fn solve<W: Write>(
        &mut self,
        problem: &Problem,
        out: &mut W,
    ) -> Result<SolveResult, SearchError> {
        let slots = self.tabulator.coder().slots();
        if problem.size() != slots {
            return Err(SearchError::InvalidProblem(format!(
                "problem has {} slots but the tabulator was built for {}",
                problem.size(),
                slots
            )));
        }

        self.best = None;
        self.history.clear();
        self.statistics = SearchStatistics::default();
        let start = self.config.start.unwrap_or_else(Instant::now);
        info!(
            slots = problem.size(),
            target = %problem.target(),
            arity = self.arity,
            seed = self.config.seed,
            "starting local search"
        );

        let stop_reason = loop {
            if let Some(reason) = self.stop_reason(start) {
                break reason;
            }
            let restart = self.statistics.restarts;
            let tree = self.restart(problem)?;
            self.statistics.restarts += 1;

            let cost = evaluate_cost(problem, &tree);
            let improved = match &self.best {
                Some(best) => cost < best.cost,
                None => true,
            };
            if improved {
                let record = BestRecord {
                    resistance: tree_resistance(problem, &tree),
                    tree: tree.deep_clone(),
                    cost: cost.clone(),
                    restart,
                    elapsed: start.elapsed(),
                };
                writeln!(out, "Found after {:.3} seconds:", record.elapsed.as_secs_f64())?;
                write!(out, "{}", record.summary(problem))?;
                out.flush()?;
                info!(
                    restart,
                    resistance = %record.resistance,
                    cost = %record.cost,
                    "new best network"
                );

                self.statistics.improvements_found += 1;
                self.statistics.best_cost = Some(cost.clone());
                self.history.push(cost);
                self.best = Some(record);
            }
        };

        self.statistics.elapsed_time = start.elapsed();
        info!(
            reason = %stop_reason,
            restarts = self.statistics.restarts,
            "local search stopped"
        );
        Ok(SolveResult {
            best: self.best.clone(),
            history: self.history.clone(),
            statistics: self.statistics.clone(),
            stop_reason,
        })
    }

    /// One restart: shuffle, expand at random, then hill-climb
    fn restart(&mut self, problem: &Problem) -> Result<Tree, SearchError> {
        let mut values: Vec<Value> = (0..problem.size()).collect();
        values.shuffle(&mut self.rng);

        let mut tree = Tree::new(values);
        let mut expandables = Vec::new();
        let root = tree.root();
        randomly_expand(
            &mut tree,
            root,
            self.arity,
            self.tabulator,
            &mut self.rng,
            &mut expandables,
        )?;
        let outcome =
            iteratively_improve(problem, &mut tree, &expandables, self.tabulator, &mut self.rng)?;

        self.statistics.expandables += expandables.len() as u64;
        self.statistics.improvement_steps += outcome.steps();
        self.statistics.tabulator_queries += outcome.queries;
        if self.config.verbose {
            info!(
                restart = self.statistics.restarts,
                expandables = expandables.len(),
                steps = outcome.steps(),
                cost = %outcome.final_cost(),
                "restart finished"
            );
        } else {
            debug!(
                restart = self.statistics.restarts,
                expandables = expandables.len(),
                steps = outcome.steps(),
                cost = %outcome.final_cost(),
                "restart finished"
            );
        }
        Ok(tree)
    }

    fn stop_reason(&self, start: Instant) -> Option<StopReason> {
        if let Some(max) = self.config.max_restarts {
            if self.statistics.restarts >= max {
                return Some(StopReason::RestartLimit);
            }
        }
        if let Some(limit) = self.config.time_limit {
            if start.elapsed() >= limit {
                return Some(StopReason::TimeLimit);
            }
        }
        None
    }
}
