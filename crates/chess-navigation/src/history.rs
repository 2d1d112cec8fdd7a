//! In-memory navigation history (back/forward stack)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NavigationError;
use crate::location::Location;
use crate::Result;

const DEFAULT_MAX_ENTRIES: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Canonical path, relative to the base prefix
    pub path: String,
    pub query: Vec<(String, String)>,
    pub fragment: Option<String>,
    pub route_name: String,
    pub visited_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(location: Location, route_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            path: location.path,
            query: location.query,
            fragment: location.fragment,
            route_name,
            visited_at: Utc::now(),
        }
    }

    /// The location to revisit, including query and fragment
    pub fn location(&self) -> Location {
        Location {
            path: self.path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: Vec<HistoryEntry>,
    /// Index of the current entry, `None` before the first navigation
    cursor: Option<usize>,
    max_entries: usize,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_entries: max_entries.max(1),
        }
    }

    /// Record a navigation.
    ///
    /// Forward entries are discarded. Re-visiting the current path does not
    /// add a new entry; the current entry takes the new query and fragment.
    /// Paths are compared as given, so callers pass canonical paths.
    pub fn push(&mut self, location: Location, route_name: &str) -> &HistoryEntry {
        if let Some(index) = self.cursor {
            let current = &mut self.entries[index];
            if current.path == location.path {
                current.query = location.query;
                current.fragment = location.fragment;
                return &self.entries[index];
            }
            self.entries.truncate(index + 1);
        }

        let path = location.path.clone();
        self.entries
            .push(HistoryEntry::new(location, route_name.to_string()));

        if self.entries.len() > self.max_entries {
            let overflow = self.entries.len() - self.max_entries;
            self.entries.drain(0..overflow);
        }

        let index = self.entries.len() - 1;
        self.cursor = Some(index);

        tracing::debug!(path = %path, route = %route_name, depth = index + 1, "History push");

        &self.entries[index]
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor.map(|index| &self.entries[index])
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(index) if index > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.cursor, Some(index) if index + 1 < self.entries.len())
    }

    pub fn back(&mut self) -> Result<&HistoryEntry> {
        match self.cursor {
            Some(index) if index > 0 => {
                self.cursor = Some(index - 1);
                Ok(&self.entries[index - 1])
            }
            _ => Err(NavigationError::HistoryExhausted("back")),
        }
    }

    pub fn forward(&mut self) -> Result<&HistoryEntry> {
        match self.cursor {
            Some(index) if index + 1 < self.entries.len() => {
                self.cursor = Some(index + 1);
                Ok(&self.entries[index + 1])
            }
            _ => Err(NavigationError::HistoryExhausted("forward")),
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(href: &str) -> Location {
        Location::parse(href)
    }

    #[test]
    fn test_back_and_forward() {
        let mut history = NavigationHistory::new();
        assert!(history.current().is_none());
        assert_eq!(history.back(), Err(NavigationError::HistoryExhausted("back")));

        history.push(at("/"), "home");
        history.push(at("/faq"), "faq");
        history.push(at("/login"), "loginView");

        assert_eq!(history.back().unwrap().path, "/faq");
        assert_eq!(history.back().unwrap().path, "/");
        assert!(!history.can_go_back());
        assert!(history.back().is_err());

        assert_eq!(history.forward().unwrap().path, "/faq");
        assert!(history.can_go_forward());
        assert_eq!(history.forward().unwrap().path, "/login");
        assert!(history.forward().is_err());
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = NavigationHistory::new();
        history.push(at("/"), "home");
        history.push(at("/faq"), "faq");
        history.back().unwrap();

        history.push(at("/login"), "loginView");
        assert!(!history.can_go_forward());
        let paths: Vec<&str> = history.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/login"]);
    }

    #[test]
    fn test_same_path_not_duplicated() {
        let mut history = NavigationHistory::new();
        let first_id = history.push(at("/faq"), "faq").id.clone();
        let again = history.push(at("/faq"), "faq");
        assert_eq!(again.id, first_id);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_entry_keeps_query_and_fragment() {
        let mut history = NavigationHistory::new();
        history.push(at("/tournamentdetail/42?tab=rounds#r3"), "tournamentDetailView");
        history.push(at("/faq"), "faq");

        let entry = history.back().unwrap();
        assert_eq!(entry.path, "/tournamentdetail/42");
        assert_eq!(entry.query, vec![("tab".to_string(), "rounds".to_string())]);
        assert_eq!(entry.fragment.as_deref(), Some("r3"));
        assert_eq!(entry.location().to_string(), "/tournamentdetail/42?tab=rounds#r3");
    }

    #[test]
    fn test_same_path_takes_new_query() {
        let mut history = NavigationHistory::new();
        history.push(at("/faq?section=rules"), "faq");
        history.push(at("/faq#pairing"), "faq");

        assert_eq!(history.len(), 1);
        let current = history.current().unwrap();
        assert!(current.query.is_empty());
        assert_eq!(current.fragment.as_deref(), Some("pairing"));
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = NavigationHistory::with_capacity(2);
        history.push(at("/"), "home");
        history.push(at("/faq"), "faq");
        history.push(at("/login"), "loginView");

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].path, "/faq");
        assert_eq!(history.current().unwrap().path, "/login");
    }
}
