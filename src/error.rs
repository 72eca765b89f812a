//! Definition of the crate's error and result.

use std::sync::PoisonError;

use thiserror::Error;

/// The library's error enum.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The query expands to more leaf clauses than the configured
    /// `max_clause_count`.
    ///
    /// This is raised while building the weight of the query, never while
    /// iterating over the matching documents.
    #[error("Too many clauses: {num_clauses} > max_clause_count={max_clause_count}")]
    TooManyClauses {
        /// Number of leaf clauses the query would use.
        num_clauses: usize,
        /// Configured limit.
        max_clause_count: usize,
    },
    /// Invalid argument was passed by the user.
    #[error("An invalid argument was passed: '{0}'")]
    InvalidArgument(String),
    /// An Error happened in one of the thread.
    #[error("An error occurred in a thread: '{0}'")]
    ErrorInThread(String),
    /// A thread holding the locked panicked and poisoned the lock.
    #[error("A thread holding the lock panicked and poisoned the lock")]
    Poisoned,
    /// System error. (e.g.: We failed spawning a new thread)
    #[error("System error.'{0}'")]
    SystemError(String),
}

impl QueryError {
    /// Returns true iff the error was caused by a query exceeding the
    /// configured maximum number of clauses.
    pub fn is_too_many_clauses(&self) -> bool {
        matches!(self, QueryError::TooManyClauses { .. })
    }
}

impl<Guard> From<PoisonError<Guard>> for QueryError {
    fn from(_: PoisonError<Guard>) -> QueryError {
        QueryError::Poisoned
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(error: serde_json::Error) -> QueryError {
        QueryError::InvalidArgument(format!("Invalid settings: {error}"))
    }
}

impl From<rayon::ThreadPoolBuildError> for QueryError {
    fn from(error: rayon::ThreadPoolBuildError) -> QueryError {
        QueryError::SystemError(error.to_string())
    }
}
