//! Electrical semantics of networks and trees

pub mod cost;

// Re-export main functionality
pub use cost::{cost_of, evaluate_cost, network_resistance, resistance_with, tree_resistance};
