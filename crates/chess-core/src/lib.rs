//! Chess Tournament Client Core
//!
//! Central coordination layer for the tournament client: one session store,
//! one route table, one mount point. Consumers get the session store handle
//! explicitly through the `App`.

mod app;
mod config;
mod error;
mod routes;
mod views;

pub use app::{App, NavigationOutcome};
pub use config::{Config, E2eCredentials};
pub use error::CoreError;
pub use routes::{build_router, ROUTES};
pub use views::{load_view, View, ViewContext, ViewId};

// Re-export core components
pub use chess_navigation::{
    BasePath, HistoryEntry, Location, NavigationError, NavigationHistory, Params, RouteMatch,
    RoutePattern, Router,
};
pub use chess_session::{Session, SessionError, SessionSnapshot, SessionState, SessionStore};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging. Output goes to stderr; stdout carries command replies.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
