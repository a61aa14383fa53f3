//! Internal/external listener classification

use super::PathMatcher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which listener a request arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Listener {
    /// Trusted network; inclusive allow-list
    Internal,
    /// Public network; exclusive deny-list
    External,
}

impl fmt::Display for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Internal => f.write_str("internal"),
            Listener::External => f.write_str("external"),
        }
    }
}

impl FromStr for Listener {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "internal" => Ok(Listener::Internal),
            "external" => Ok(Listener::External),
            _ => Err(format!(
                "Invalid listener '{}'. Valid options: internal, external",
                s
            )),
        }
    }
}

/// The two ACL pattern sets with their polarity applied
#[derive(Debug, Clone)]
pub struct Perimeter {
    allow: PathMatcher,
    deny: PathMatcher,
}

impl Perimeter {
    pub fn new(allow: PathMatcher, deny: PathMatcher) -> Self {
        Perimeter { allow, deny }
    }

    /// Perimeter built from the gateway's fixed allow and deny lists
    pub fn builtin() -> Self {
        Self::new(
            PathMatcher::new(super::lists::INTERNAL_ALLOW_LIST),
            PathMatcher::new(super::lists::EXTERNAL_DENY_LIST),
        )
    }

    /// Decide whether a request for `path` may pass the given listener
    ///
    /// The internal listener admits only paths found in the allow-list. The
    /// external listener admits everything except paths found in the
    /// deny-list.
    pub fn admits(&self, listener: Listener, path: &str) -> bool {
        let admitted = match listener {
            Listener::Internal => self.allow.matches(path),
            Listener::External => !self.deny.matches(path),
        };
        debug!(%listener, path, admitted, "perimeter check");
        admitted
    }

    pub fn allow_list(&self) -> &PathMatcher {
        &self.allow
    }

    pub fn deny_list(&self) -> &PathMatcher {
        &self.deny
    }
}

impl Default for Perimeter {
    fn default() -> Self {
        Self::builtin()
    }
}
