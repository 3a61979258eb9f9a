//! Error type for loading location graphs.

use thiserror::Error;

/// Errors produced while reading edge and facility lists.
///
/// Queries on a built [`LocationGraph`](crate::LocationGraph) never fail;
/// an unknown or isolated location is a negative answer, not an error.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: empty location name")]
    EmptyLocation { line: u64 },

    #[error("line {line}: negative weight {meters} on edge {from} - {to}")]
    NegativeWeight {
        line: u64,
        from: String,
        to: String,
        meters: i64,
    },

    #[error("line {line}: weight {meters} does not fit in 32 bits")]
    WeightOverflow { line: u64, meters: i64 },
}

pub type RouteResult<T> = Result<T, RouteError>;
