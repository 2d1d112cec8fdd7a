//! Route path patterns
//!
//! `/tournamentdetail/:id` is two segments: a static `tournamentdetail` and a
//! required parameter `id`. Static segments compare case-insensitively, a
//! single trailing slash is ignored and parameter values are percent-decoded;
//! a parameter that does not decode to UTF-8 fails the match.

use percent_encoding::percent_decode_str;
use serde::{Serialize, Serializer};

use crate::error::NavigationError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| NavigationError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(invalid("must start with '/'"));
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('/') {
                if part.is_empty() {
                    return Err(invalid("empty segment"));
                }

                match part.strip_prefix(':') {
                    Some("") => return Err(invalid("parameter without a name")),
                    Some(name) => {
                        if segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(n) if n == name))
                        {
                            return Err(invalid(&format!("duplicate parameter ':{}'", name)));
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Static(part.to_string())),
                }
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Match a bare path (no query or fragment) against this pattern
    pub fn matches(&self, path: &str) -> Option<Params> {
        self.match_canonical(path).map(|(params, _)| params)
    }

    /// Match `path` and also return its canonical spelling: static segments
    /// as declared, parameters as requested, no trailing slash.
    pub fn match_canonical(&self, path: &str) -> Option<(Params, String)> {
        let rest = path.strip_prefix('/')?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::default();
        let mut canonical = String::with_capacity(path.len());
        for (segment, part) in self.segments.iter().zip(parts) {
            canonical.push('/');
            match segment {
                Segment::Static(expected) => {
                    if !expected.eq_ignore_ascii_case(part) {
                        return None;
                    }
                    canonical.push_str(expected);
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    // Bytes that do not decode to UTF-8 never match
                    let value = percent_decode_str(part).decode_utf8().ok()?;
                    params.insert(name.clone(), value.into_owned());
                    canonical.push_str(part);
                }
            }
        }

        if canonical.is_empty() {
            canonical.push('/');
        }

        Some((params, canonical))
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Named path parameters, in pattern order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, name: String, value: String) {
        self.0.push((name, value));
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
