//! Randomized local search over series/parallel trees
//!
//! A restart shuffles the slots, deals them into a random alternating tree
//! ([`randomly_expand`]), then re-optimizes small subtrees against the
//! tabulator until no step helps ([`iteratively_improve`]).
//! [`LocalSolver`] repeats this and keeps the best network seen.

pub mod expand;
pub mod improve;
pub mod solver;

pub use expand::randomly_expand;
pub use improve::{iteratively_improve, ImproveOutcome};
pub use solver::LocalSolver;
