//! Policy evaluation engine
//!
//! Evaluates `(role, resource, action)` against an immutable [`PolicySet`].
//! Key features:
//! - Allow-only rules; no matching rule means deny
//! - Role inheritance through the hierarchy closure
//! - Key-pattern resources with a `/v1` retry
//! - Regex action patterns
//! - LRU decision caching, safe to share between threads

use super::{DecisionCache, PolicySet};
use crate::error::Result;
use tracing::debug;

/// Default number of cached decisions
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Policy evaluation engine
#[derive(Debug)]
pub struct PolicyEngine {
    policy: PolicySet,
    cache: DecisionCache,
}

impl PolicyEngine {
    /// Create a new policy engine with given cache capacity
    pub fn new(policy: PolicySet, cache_capacity: usize) -> Self {
        PolicyEngine {
            policy,
            cache: DecisionCache::new(cache_capacity),
        }
    }

    /// Engine over the built-in policy with the default cache
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(PolicySet::builtin()?, DEFAULT_CACHE_CAPACITY))
    }

    /// Decide whether `role` may perform `action` on `resource`
    ///
    /// # Examples
    ///
    /// ```
    /// use gatehouse::policy::PolicyEngine;
    ///
    /// let engine = PolicyEngine::builtin().unwrap();
    ///
    /// assert!(engine.enforce("consumer", "/bytes/abc", "GET"));
    /// assert!(engine.enforce("maintainer", "/bytes/abc", "GET"));
    /// assert!(!engine.enforce("consumer", "/chequebook/withdraw", "POST"));
    /// assert!(!engine.enforce("nobody", "/bytes/abc", "GET"));
    /// ```
    pub fn enforce(&self, role: &str, resource: &str, action: &str) -> bool {
        if let Some(cached) = self.cache.get(role, resource, action) {
            return cached;
        }

        let allowed = self.evaluate_uncached(role, resource, action);
        self.cache.put(role, resource, action, allowed);

        debug!(role, resource, action, allowed, "policy decision");
        allowed
    }

    /// Evaluate without using cache
    fn evaluate_uncached(&self, role: &str, resource: &str, action: &str) -> bool {
        let hierarchy = self.policy.hierarchy();

        // Unknown roles satisfy no subject
        if !hierarchy.contains(role) {
            return false;
        }

        self.policy.rules().iter().any(|rule| {
            hierarchy.satisfies(role, &rule.subject) && rule.applies_to(resource, action)
        })
    }

    pub fn policy(&self) -> &PolicySet {
        &self.policy
    }

    /// Clear the decision cache
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached decisions
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
