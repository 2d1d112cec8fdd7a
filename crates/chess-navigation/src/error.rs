//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No route matches path: {0}")]
    NotFound(String),

    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Route already declared: {0}")]
    DuplicateRoute(String),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Failed to load view for route '{route}': {reason}")]
    LoadFailed { route: String, reason: String },

    #[error("Loading view for route '{route}' timed out after {timeout_ms}ms")]
    LoadTimeout { route: String, timeout_ms: u64 },

    #[error("No history entry to go {0}")]
    HistoryExhausted(&'static str),
}

/// Error returned by a view loader
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct LoadError(pub String);

impl LoadError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}
