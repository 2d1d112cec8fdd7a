//! Client Navigation
//!
//! Maps request paths to views:
//! - Routes are declared once at startup, first matching pattern wins
//! - Patterns may carry named parameters (`/tournamentdetail/:id`)
//! - A view's implementation is loaded on first navigation, bounded by a
//!   timeout, and cached only when the load succeeds
//! - History mode: an optional base prefix and a back/forward stack

mod error;
mod history;
mod location;
mod pattern;
mod router;

pub use error::{LoadError, NavigationError};
pub use history::{HistoryEntry, NavigationHistory};
pub use location::{BasePath, Location};
pub use pattern::{Params, RoutePattern};
pub use router::{LoadFuture, Navigation, Route, RouteMatch, Router, ViewLoader};

pub type Result<T> = std::result::Result<T, NavigationError>;
