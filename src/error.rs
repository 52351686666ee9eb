//! Error types for the network search

use crate::tabulator::coder::Mask;
use thiserror::Error;

/// Fatal errors raised while configuring or running the search.
///
/// None of these are recovered from: the driver stops and the CLI reports
/// them as a one-line diagnostic. Best networks already printed stay valid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A command-line value could not be parsed
    #[error("invalid argument: {0}")]
    ArgParse(String),

    /// An expandable produced a key the tabulator holds no entry for
    #[error("tabulator has no entry for slot set {key} ({size} slots); table arity is too small")]
    TabulatorMiss { key: Mask, size: usize },

    /// The problem or solver parameters cannot be searched
    #[error("invalid problem: {0}")]
    InvalidProblem(String),

    /// Writing to the output sink failed
    #[error("output error: {0}")]
    Output(String),
}

impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        SearchError::Output(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
