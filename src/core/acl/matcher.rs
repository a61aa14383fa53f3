//! Ordered path pattern sets
//!
//! Each entry is a regular expression searched anywhere inside the request
//! path (query string included). Matching is an unanchored substring search,
//! so `"/bzz*"` also matches `/bzzz` and `/v1/bzz`. Entries are compiled once
//! when the set is built; evaluation never recompiles.

use regex::Regex;
use tracing::warn;

/// A single compiled entry. `None` marks a pattern that failed to compile.
#[derive(Debug, Clone)]
struct Entry {
    source: String,
    compiled: Option<Regex>,
}

/// Ordered set of path patterns
///
/// The matcher has no polarity of its own; see [`super::Perimeter`] for the
/// allow/deny interpretation.
#[derive(Debug, Clone, Default)]
pub struct PathMatcher {
    entries: Vec<Entry>,
}

impl PathMatcher {
    /// Compile a pattern set, preserving order
    ///
    /// A malformed pattern is logged and kept as an inert entry that never
    /// matches.
    ///
    /// # Examples
    /// ```
    /// use gatehouse::acl::PathMatcher;
    ///
    /// let allow = PathMatcher::new(["/bytes/*", "/tags*"]);
    /// assert!(allow.matches("/bytes/122"));
    /// assert!(allow.matches("/tags?query=val"));
    /// assert!(!allow.matches("/health"));
    /// ```
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = patterns
            .into_iter()
            .map(|p| {
                let source = p.as_ref().to_string();
                let compiled = match Regex::new(&source) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!(pattern = %source, error = %e, "ignoring malformed ACL pattern");
                        None
                    }
                };
                Entry { source, compiled }
            })
            .collect();

        PathMatcher { entries }
    }

    /// Check whether any entry is found in `path`
    pub fn matches(&self, path: &str) -> bool {
        self.first_match(path).is_some()
    }

    /// Return the source of the first entry found in `path`
    pub fn first_match(&self, path: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match &entry.compiled {
            Some(re) if re.is_match(path) => Some(entry.source.as_str()),
            _ => None,
        })
    }

    /// Number of entries, inert ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that failed to compile
    pub fn inert_count(&self) -> usize {
        self.entries.iter().filter(|e| e.compiled.is_none()).count()
    }

    /// Pattern sources in evaluation order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.source.as_str())
    }
}
