//! Client Session Store
//!
//! Holds the credential used to talk to the tournament backend and whether
//! the client is currently authenticated:
//! - `set_token` moves the store to Authenticated (replacing any token)
//! - `logout` moves it back to Anonymous (idempotent)
//! - The authenticated flag is derived from the token, never stored apart
//! - The store is an explicit handle; clones share the same session

mod error;
mod session;
mod store;

pub use error::SessionError;
pub use session::{Session, SessionSnapshot, SessionState};
pub use store::SessionStore;

pub type Result<T> = std::result::Result<T, SessionError>;
