//! Session data structure and state machine
//!
//! ```text
//! Anonymous ──set_token──▶ Authenticated ──set_token──▶ Authenticated
//!     ▲                         │
//!     └──────── logout ─────────┘        (logout on Anonymous is a no-op)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No credential held
    Anonymous,
    /// A token is held and sent to the backend
    Authenticated,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Anonymous => "anonymous",
            SessionState::Authenticated => "authenticated",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SessionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anonymous" => Ok(SessionState::Anonymous),
            "authenticated" => Ok(SessionState::Authenticated),
            _ => Err(format!("Unknown session state: {}", s)),
        }
    }
}

/// The client-local authentication record.
///
/// Fields are private: the authenticated flag is computed from `token`, so
/// the two can never disagree.
#[derive(Clone, Default)]
pub struct Session {
    token: Option<String>,
    authenticated_at: Option<DateTime<Utc>>,
    revision: u64,
}

impl Session {
    /// A fresh anonymous session
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn authenticated_at(&self) -> Option<DateTime<Utc>> {
        self.authenticated_at
    }

    /// Number of effective mutations since creation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Install a token. Callers validate the token first.
    pub(crate) fn install_token(&mut self, token: String) {
        self.token = Some(token);
        self.authenticated_at = Some(Utc::now());
        self.revision += 1;
    }

    /// Drop the token. Returns false when there was nothing to clear.
    pub(crate) fn clear(&mut self) -> bool {
        if self.token.is_none() {
            return false;
        }

        self.token = None;
        self.authenticated_at = None;
        self.revision += 1;
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state(),
            token: self.token.clone(),
            authenticated_at: self.authenticated_at,
            revision: self.revision,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("authenticated_at", &self.authenticated_at)
            .field("revision", &self.revision)
            .finish()
    }
}

/// Point-in-time copy of a session, handed to observers.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub token: Option<String>,
    pub authenticated_at: Option<DateTime<Utc>>,
    pub revision: u64,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl std::fmt::Debug for SessionSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSnapshot")
            .field("state", &self.state)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("authenticated_at", &self.authenticated_at)
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(session.token().is_none());
        assert!(!session.is_authenticated());
        assert!(session.authenticated_at().is_none());
        assert_eq!(session.revision(), 0);
    }

    #[test]
    fn test_install_and_clear() {
        let mut session = Session::new();

        session.install_token("abc".to_string());
        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.token(), Some("abc"));
        assert!(session.authenticated_at().is_some());

        assert!(session.clear());
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(session.authenticated_at().is_none());

        // Clearing again changes nothing
        assert!(!session.clear());
        assert_eq!(session.revision(), 2);
    }

    #[test]
    fn test_state_parse() {
        assert_eq!("Authenticated".parse::<SessionState>(), Ok(SessionState::Authenticated));
        assert_eq!("anonymous".parse::<SessionState>(), Ok(SessionState::Anonymous));
        assert!("expired".parse::<SessionState>().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut session = Session::new();
        session.install_token("secret-jwt".to_string());

        let rendered = format!("{:?} {:?}", session, session.snapshot());
        assert!(!rendered.contains("secret-jwt"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_snapshot_serializes_state_lowercase() {
        let snapshot = Session::new().snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["state"], "anonymous");
        assert!(json["token"].is_null());
    }
}
