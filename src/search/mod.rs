//! Search driver for resistor networks
//!
//! - `config`: seed, stop predicates and expansion arity
//! - `local`: random expansion, hill climbing and the restart loop
//! - `result`: best record, statistics and stop reasons

pub mod config;
pub mod local;
pub mod result;

pub use config::{SolverConfig, DEFAULT_SEED};
pub use local::LocalSolver;
pub use result::{BestRecord, SearchStatistics, SolveResult, StopReason};
