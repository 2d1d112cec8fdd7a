//! Request locations and the history-mode base prefix

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// A requested location split into the part used for matching and the parts
/// handed through to the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub fragment: Option<String>,
}

impl Location {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (input, None),
        };

        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (
                path,
                form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect(),
            ),
            None => (rest, Vec::new()),
        };

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Self {
            path,
            query,
            fragment,
        }
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)?;

        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&self.query)
                .finish();
            write!(f, "?{}", query)?;
        }

        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }

        Ok(())
    }
}

/// Base prefix the app is served under (`/` or e.g. `/client/`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    pub fn new(base: &str) -> Self {
        let trimmed = base.trim().trim_matches('/');
        if trimmed.is_empty() {
            Self("/".to_string())
        } else {
            Self(format!("/{}", trimmed))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Remove the base prefix from a browser path.
    ///
    /// Returns `None` for paths outside the base.
    pub fn strip(&self, path: &str) -> Option<String> {
        if self.is_root() {
            return Some(path.to_string());
        }

        let rest = path.strip_prefix(self.0.as_str())?;
        match rest.chars().next() {
            None => Some("/".to_string()),
            Some('/') => Some(rest.to_string()),
            Some('?') | Some('#') => Some(format!("/{}", rest)),
            Some(_) => None,
        }
    }

    /// Prefix an app path with the base
    pub fn join(&self, path: &str) -> String {
        if self.is_root() {
            return path.to_string();
        }

        match path {
            "" | "/" => format!("{}/", self.0),
            p if p.starts_with('/') => format!("{}{}", self.0, p),
            p => format!("{}/{}", self.0, p),
        }
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_path() {
        let location = Location::parse("/faq");
        assert_eq!(location.path, "/faq");
        assert!(location.query.is_empty());
        assert!(location.fragment.is_none());
    }

    #[test]
    fn test_parse_query_and_fragment() {
        let location = Location::parse("/tournamentdetail/3?round=2&sort=elo+desc#standings");
        assert_eq!(location.path, "/tournamentdetail/3");
        assert_eq!(location.query_value("round"), Some("2"));
        assert_eq!(location.query_value("sort"), Some("elo desc"));
        assert_eq!(location.fragment.as_deref(), Some("standings"));
    }

    #[test]
    fn test_display_rebuilds_href() {
        let href = "/tournamentdetail/3?round=2&sort=elo+desc#standings";
        assert_eq!(Location::parse(href).to_string(), href);
        assert_eq!(Location::parse("/faq").to_string(), "/faq");
    }

    #[test]
    fn test_parse_normalizes_missing_slash() {
        assert_eq!(Location::parse("").path, "/");
        assert_eq!(Location::parse("login").path, "/login");
    }

    #[test]
    fn test_base_path_root() {
        let base = BasePath::new("/");
        assert!(base.is_root());
        assert_eq!(base.strip("/faq").as_deref(), Some("/faq"));
        assert_eq!(base.join("/faq"), "/faq");
    }

    #[test]
    fn test_base_path_prefix() {
        let base = BasePath::new("/client/");
        assert_eq!(base.as_str(), "/client");

        assert_eq!(base.strip("/client").as_deref(), Some("/"));
        assert_eq!(base.strip("/client/").as_deref(), Some("/"));
        assert_eq!(base.strip("/client/faq").as_deref(), Some("/faq"));
        assert_eq!(base.strip("/client?x=1").as_deref(), Some("/?x=1"));
        assert!(base.strip("/clientele").is_none());
        assert!(base.strip("/faq").is_none());

        assert_eq!(base.join("/login"), "/client/login");
        assert_eq!(base.join("/"), "/client/");
    }
}
