//! Stochastic local search for resistor networks
//!
//! Given N resistors from a component series and a target resistance, the
//! search looks for a series/parallel network using every resistor whose
//! resistance is as close to the target as possible. Small slot groups are
//! solved exhaustively up front ([`tabulator`]); the randomized restart
//! search ([`search`]) builds random trees over the rest and swaps tabulated
//! subnetworks in and out. All arithmetic is exact ([`ir::Ratio`]).

pub mod error;
pub mod ir;
pub mod search;
pub mod semantics;
pub mod tabulator;

pub use error::{Result, SearchError};
pub use ir::{Problem, Ratio, Series, Tree};
pub use search::{LocalSolver, SolveResult, SolverConfig};
pub use tabulator::{ExhaustiveTabulator, Tabulator};
