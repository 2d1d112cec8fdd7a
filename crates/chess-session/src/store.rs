//! Session Store
//!
//! Shared handle over the single client session. Every effective mutation is
//! published on a watch channel so route guards and views can react to the
//! latest state.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::SessionError;
use crate::session::{Session, SessionSnapshot, SessionState};
use crate::Result;

pub struct SessionStore {
    /// Current session, the single source of truth
    session: Arc<RwLock<Session>>,
    /// Latest snapshot for observers
    updates: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionStore {
    /// Create a store in the Anonymous state
    pub fn new() -> Self {
        let session = Session::new();
        let (tx, _rx) = watch::channel(session.snapshot());

        Self {
            session: Arc::new(RwLock::new(session)),
            updates: Arc::new(tx),
        }
    }

    /// Install `token` and mark the client authenticated.
    ///
    /// An existing token is replaced in a single step, so observers never see
    /// an anonymous state in between. Blank tokens are rejected and leave the
    /// session untouched.
    pub fn set_token(&self, token: impl Into<String>) -> Result<SessionSnapshot> {
        let token = token.into();
        if token.trim().is_empty() {
            tracing::warn!("Rejected empty session token");
            return Err(SessionError::EmptyToken);
        }

        let mut session = self.session.write();
        let from = session.state();
        session.install_token(token);

        let snapshot = session.snapshot();
        self.updates.send_replace(snapshot.clone());

        tracing::info!(
            from = %from,
            to = %snapshot.state,
            revision = snapshot.revision,
            "Session token set"
        );

        Ok(snapshot)
    }

    /// Drop the token. Calling this while anonymous is a no-op.
    pub fn logout(&self) -> SessionSnapshot {
        let mut session = self.session.write();

        if !session.clear() {
            tracing::debug!("Logout while anonymous, nothing to clear");
            return session.snapshot();
        }

        let snapshot = session.snapshot();
        self.updates.send_replace(snapshot.clone());

        tracing::info!(
            from = %SessionState::Authenticated,
            to = %snapshot.state,
            revision = snapshot.revision,
            "Session logged out"
        );
        snapshot
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn state(&self) -> SessionState {
        self.session.read().state()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.read().snapshot()
    }

    /// Watch for session changes.
    ///
    /// The receiver starts at the current snapshot; `changed().await`
    /// resolves on the next effective `set_token` or `logout`.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.updates.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            updates: Arc::clone(&self.updates),
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.session.read())
            .finish()
    }
}
