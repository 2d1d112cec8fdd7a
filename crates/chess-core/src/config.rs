//! Client configuration
//!
//! Defaults match the development setup: app served from `/`, mounted on
//! `#app`, dev server on `http://localhost:5173`. Every field can be
//! overridden from the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::CoreError;
use crate::Result;

pub const ENV_BASE_URL: &str = "BASE_URL";
pub const ENV_MOUNT_POINT: &str = "CHESS_MOUNT_POINT";
pub const ENV_VIEW_LOAD_TIMEOUT_MS: &str = "CHESS_VIEW_LOAD_TIMEOUT_MS";
pub const ENV_DEV_SERVER_URL: &str = "CHESS_DEV_SERVER_URL";
pub const ENV_E2E_USERNAME: &str = "CHESS_E2E_USERNAME";
pub const ENV_E2E_PASSWORD: &str = "CHESS_E2E_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix the app is served under in history mode
    pub base_url: String,
    /// Selector of the element the app attaches to
    pub mount_point: String,
    /// Upper bound on loading a view's implementation
    pub view_load_timeout_ms: u64,
    /// Where the client is served during development and e2e runs
    pub dev_server_url: Url,
    /// Credentials supplied by the e2e harness, never by the app itself
    pub e2e: Option<E2eCredentials>,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load a JSON config file, then apply environment overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with(path, |key| std::env::var(key).ok())
    }

    /// Load a JSON config file, then apply overrides from `lookup`
    pub fn from_file_with<P, F>(path: P, lookup: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_json::from_str(&raw)?;
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }

        if let Some(mount_point) = lookup(ENV_MOUNT_POINT) {
            self.mount_point = mount_point;
        }

        if let Some(timeout) = lookup(ENV_VIEW_LOAD_TIMEOUT_MS) {
            self.view_load_timeout_ms = timeout.trim().parse().map_err(|_| {
                CoreError::Config(format!(
                    "{} must be a number of milliseconds, got '{}'",
                    ENV_VIEW_LOAD_TIMEOUT_MS, timeout
                ))
            })?;
        }

        if let Some(url) = lookup(ENV_DEV_SERVER_URL) {
            self.dev_server_url = Url::parse(&url).map_err(|e| {
                CoreError::Config(format!("{} is not a valid URL: {}", ENV_DEV_SERVER_URL, e))
            })?;
        }

        match (lookup(ENV_E2E_USERNAME), lookup(ENV_E2E_PASSWORD)) {
            (Some(username), Some(password)) => {
                self.e2e = Some(E2eCredentials { username, password });
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(CoreError::Config(format!(
                    "{} and {} must be set together",
                    ENV_E2E_USERNAME, ENV_E2E_PASSWORD
                )));
            }
            (None, None) => {}
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.view_load_timeout_ms == 0 {
            return Err(CoreError::Config(
                "view load timeout must be greater than zero".to_string(),
            ));
        }

        if !self.mount_point.starts_with('#') || self.mount_point.len() < 2 {
            return Err(CoreError::Config(format!(
                "mount point must be an element id selector like '#app', got '{}'",
                self.mount_point
            )));
        }

        Ok(())
    }

    pub fn view_load_timeout(&self) -> Duration {
        Duration::from_millis(self.view_load_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            mount_point: "#app".to_string(),
            view_load_timeout_ms: 10_000,
            dev_server_url: Url::parse("http://localhost:5173").expect("static URL is valid"),
            e2e: None,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct E2eCredentials {
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl std::fmt::Debug for E2eCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("E2eCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
