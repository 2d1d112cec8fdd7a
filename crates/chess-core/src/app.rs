//! Application container
//!
//! Owns the session store and the router and drives navigation: strip the
//! base prefix, resolve, load the view lazily, enter it, record history.
//! The session store is passed to views explicitly; there is no global.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use chess_navigation::{
    BasePath, HistoryEntry, NavigationError, NavigationHistory, RouteMatch, Router,
};
use chess_session::{SessionSnapshot, SessionStore};

use crate::config::Config;
use crate::error::CoreError;
use crate::routes::build_router;
use crate::views::{View, ViewContext, ViewId};
use crate::Result;

/// Result of a completed navigation
#[derive(Debug, Clone, Serialize)]
pub struct NavigationOutcome {
    pub view: ViewId,
    pub title: String,
    /// Browser-facing path, including the base prefix
    pub full_path: String,
    #[serde(flatten)]
    pub matched: RouteMatch,
    pub authenticated: bool,
    pub navigated_at: DateTime<Utc>,
}

pub struct App {
    config: Config,
    base: BasePath,
    session: SessionStore,
    router: Router<dyn View>,
    history: Arc<RwLock<NavigationHistory>>,
    current: Arc<RwLock<Option<NavigationOutcome>>>,
    mounted_on: Arc<RwLock<Option<String>>>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let router = build_router(config.view_load_timeout())?;
        let base = BasePath::new(&config.base_url);

        tracing::info!(
            base = %base.as_str(),
            mount_point = %config.mount_point,
            load_timeout_ms = config.view_load_timeout_ms,
            "Client created"
        );

        Ok(Self {
            config,
            base,
            session: SessionStore::new(),
            router,
            history: Arc::new(RwLock::new(NavigationHistory::new())),
            current: Arc::new(RwLock::new(None)),
            mounted_on: Arc::new(RwLock::new(None)),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// History-mode prefix the client is served under
    pub fn base(&self) -> &BasePath {
        &self.base
    }

    /// Browser path of the home route
    pub fn home_path(&self) -> String {
        self.base.join("/")
    }

    pub fn router(&self) -> &Router<dyn View> {
        &self.router
    }

    /// Handle to the session store, shared with every consumer
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Attach to the mount point element
    pub fn mount(&self, selector: &str) -> Result<()> {
        let selector = selector.trim();
        if selector != self.config.mount_point {
            return Err(CoreError::MountPoint {
                requested: selector.to_string(),
                expected: self.config.mount_point.clone(),
            });
        }

        let mut mounted = self.mounted_on.write();
        if let Some(existing) = mounted.as_ref() {
            return Err(CoreError::AlreadyMounted(existing.clone()));
        }
        *mounted = Some(selector.to_string());

        tracing::info!(mount_point = %selector, "Client mounted");
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted_on.read().is_some()
    }

    /// Navigate to a browser path and record it in history
    pub async fn navigate(&self, path: &str) -> Result<NavigationOutcome> {
        let outcome = self.visit(path).await?;
        self.history
            .write()
            .push(outcome.matched.location(), &outcome.matched.route_name);
        Ok(outcome)
    }

    /// Go to the previous history entry
    pub async fn back(&self) -> Result<NavigationOutcome> {
        self.ensure_mounted()?;
        let entry = self.history.write().back()?.clone();
        self.revisit(entry, true).await
    }

    /// Go to the next history entry
    pub async fn forward(&self) -> Result<NavigationOutcome> {
        self.ensure_mounted()?;
        let entry = self.history.write().forward()?.clone();
        self.revisit(entry, false).await
    }

    async fn revisit(&self, entry: HistoryEntry, went_back: bool) -> Result<NavigationOutcome> {
        let href = self.base.join(&entry.location().to_string());
        match self.visit(&href).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                // Undo the cursor move so history still points at the shown view
                let mut history = self.history.write();
                let _ = if went_back {
                    history.forward()
                } else {
                    history.back()
                };
                Err(e)
            }
        }
    }

    async fn visit(&self, path: &str) -> Result<NavigationOutcome> {
        self.ensure_mounted()?;

        let app_path = self
            .base
            .strip(path)
            .ok_or_else(|| NavigationError::NotFound(path.to_string()))?;

        let navigation = self.router.navigate(&app_path).await?;
        let view = navigation.view;
        let matched = navigation.matched;

        let ctx = ViewContext {
            session: &self.session,
            params: &matched.params,
            query: &matched.query,
        };
        view.enter(&ctx)?;

        let outcome = NavigationOutcome {
            view: view.id(),
            title: view.title().to_string(),
            full_path: self.base.join(&matched.path),
            matched,
            authenticated: self.session.is_authenticated(),
            navigated_at: Utc::now(),
        };

        tracing::info!(
            path = %outcome.full_path,
            view = %outcome.view,
            authenticated = outcome.authenticated,
            "Navigated"
        );

        *self.current.write() = Some(outcome.clone());
        Ok(outcome)
    }

    fn ensure_mounted(&self) -> Result<()> {
        if self.is_mounted() {
            Ok(())
        } else {
            Err(CoreError::NotMounted)
        }
    }

    /// The view currently shown, if any navigation has completed
    pub fn current(&self) -> Option<NavigationOutcome> {
        self.current.read().clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.read().entries().to_vec()
    }

    pub fn login(&self, token: &str) -> Result<SessionSnapshot> {
        Ok(self.session.set_token(token)?)
    }

    pub fn logout(&self) -> SessionSnapshot {
        self.session.logout()
    }
}
