//! Route table and lazy view resolution

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;

use crate::error::{LoadError, NavigationError};
use crate::location::Location;
use crate::pattern::{Params, RoutePattern};
use crate::Result;

pub type LoadFuture<V> = BoxFuture<'static, std::result::Result<Arc<V>, LoadError>>;

/// Async factory producing a route's view on demand
pub type ViewLoader<V> = Arc<dyn Fn() -> LoadFuture<V> + Send + Sync>;

pub struct Route<V: ?Sized> {
    name: String,
    pattern: RoutePattern,
    loader: ViewLoader<V>,
    /// Filled on the first successful load
    view: OnceCell<Arc<V>>,
}

impl<V: ?Sized + Send + Sync + 'static> Route<V> {
    pub fn new<F, Fut>(name: impl Into<String>, pattern: &str, loader: F) -> Result<Self>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<Arc<V>, LoadError>> + Send + 'static,
    {
        Ok(Self {
            name: name.into(),
            pattern: RoutePattern::parse(pattern)?,
            loader: Arc::new(move || loader().boxed()),
            view: OnceCell::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn is_loaded(&self) -> bool {
        self.view.initialized()
    }
}

impl<V: ?Sized> std::fmt::Debug for Route<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("loaded", &self.view.initialized())
            .finish()
    }
}

/// Outcome of matching a path against the route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub route_name: String,
    pub pattern: String,
    /// Matched path in canonical spelling
    pub path: String,
    pub params: Params,
    pub query: Vec<(String, String)>,
    pub fragment: Option<String>,
}

impl RouteMatch {
    /// The matched location, canonical path plus query and fragment
    pub fn location(&self) -> Location {
        Location {
            path: self.path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        }
    }
}

/// A resolved route together with its loaded view
pub struct Navigation<V: ?Sized> {
    pub matched: RouteMatch,
    pub view: Arc<V>,
}

impl<V: ?Sized> std::fmt::Debug for Navigation<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigation")
            .field("matched", &self.matched)
            .finish_non_exhaustive()
    }
}

pub struct Router<V: ?Sized> {
    routes: Vec<Route<V>>,
    load_timeout: Duration,
}

impl<V: ?Sized + Send + Sync + 'static> Router<V> {
    pub fn new(load_timeout: Duration) -> Self {
        Self {
            routes: Vec::new(),
            load_timeout,
        }
    }

    /// Declare a route. Route names must be unique.
    pub fn add_route(&mut self, route: Route<V>) -> Result<()> {
        if self.routes.iter().any(|r| r.name == route.name) {
            return Err(NavigationError::DuplicateRoute(route.name));
        }

        tracing::debug!(route = %route.name, pattern = %route.pattern, "Declared route");
        self.routes.push(route);
        Ok(())
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route<V>> {
        self.routes.iter()
    }

    pub fn route(&self, name: &str) -> Option<&Route<V>> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn load_timeout(&self) -> Duration {
        self.load_timeout
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.route(name).is_some_and(Route::is_loaded)
    }

    /// Find the first route whose pattern matches `path`
    pub fn resolve(&self, path: &str) -> Result<RouteMatch> {
        let location = Location::parse(path);

        for route in &self.routes {
            if let Some((params, path)) = route.pattern.match_canonical(&location.path) {
                tracing::debug!(
                    path = %path,
                    route = %route.name,
                    params = params.len(),
                    "Resolved route"
                );

                return Ok(RouteMatch {
                    route_name: route.name.clone(),
                    pattern: route.pattern.as_str().to_string(),
                    path,
                    params,
                    query: location.query,
                    fragment: location.fragment,
                });
            }
        }

        tracing::debug!(path = %location.path, "No route matched");
        Err(NavigationError::NotFound(location.path))
    }

    /// Load the view for a route, running its loader at most once.
    ///
    /// Concurrent first loads wait on the same loader run. A failed or timed
    /// out load leaves the route unloaded so the next navigation retries.
    pub async fn load(&self, name: &str) -> Result<Arc<V>> {
        let route = self
            .route(name)
            .ok_or_else(|| NavigationError::UnknownRoute(name.to_string()))?;

        if let Some(view) = route.view.get() {
            tracing::debug!(route = %name, "View already loaded");
            return Ok(Arc::clone(view));
        }

        let view = route
            .view
            .get_or_try_init(|| async {
                let started = Instant::now();
                let outcome = tokio::time::timeout(self.load_timeout, (route.loader)()).await;

                match outcome {
                    Ok(Ok(view)) => {
                        tracing::info!(
                            route = %name,
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "Loaded view"
                        );
                        Ok(view)
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(route = %name, error = %e, "View load failed");
                        Err(NavigationError::LoadFailed {
                            route: name.to_string(),
                            reason: e.to_string(),
                        })
                    }
                    Err(_) => {
                        let timeout_ms = self.load_timeout.as_millis() as u64;
                        tracing::warn!(route = %name, timeout_ms, "View load timed out");
                        Err(NavigationError::LoadTimeout {
                            route: name.to_string(),
                            timeout_ms,
                        })
                    }
                }
            })
            .await?;

        Ok(Arc::clone(view))
    }

    /// Resolve `path` and load the matched view
    pub async fn navigate(&self, path: &str) -> Result<Navigation<V>> {
        let matched = self.resolve(path)?;
        let view = self.load(&matched.route_name).await?;
        Ok(Navigation { matched, view })
    }
}

impl<V: ?Sized> std::fmt::Debug for Router<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("load_timeout", &self.load_timeout)
            .finish()
    }
}
