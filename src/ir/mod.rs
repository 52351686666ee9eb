//! Data model: exact ratios, component series, problems, trees and networks

pub mod network;
pub mod problem;
pub mod ratio;
pub mod series;
pub mod tree;
pub mod types;

// Re-export commonly used types
pub use network::Network;
pub use problem::Problem;
pub use ratio::Ratio;
pub use series::{Series, SeriesTable};
pub use tree::{Child, Node, NodeId, Tree};
pub use types::{Composition, Value};
