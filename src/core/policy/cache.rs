//! LRU cache for policy decisions
//!
//! The rule table never changes after startup, so a cached decision stays
//! correct for the life of the engine.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

/// Cache key for a policy decision
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DecisionKey {
    role: String,
    resource: String,
    action: String,
}

impl DecisionKey {
    fn new(role: &str, resource: &str, action: &str) -> Self {
        DecisionKey {
            role: role.to_string(),
            resource: resource.to_string(),
            action: action.to_string(),
        }
    }
}

/// Shared LRU cache of decisions
///
/// A capacity of zero disables caching entirely.
pub struct DecisionCache {
    cache: Option<Mutex<LruCache<DecisionKey, bool>>>,
}

impl DecisionCache {
    /// Create a new decision cache with given capacity
    pub fn new(capacity: usize) -> Self {
        DecisionCache {
            cache: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// Get cached decision
    pub fn get(&self, role: &str, resource: &str, action: &str) -> Option<bool> {
        let cache = self.cache.as_ref()?;
        cache.lock().get(&DecisionKey::new(role, resource, action)).copied()
    }

    /// Store a decision
    pub fn put(&self, role: &str, resource: &str, action: &str, allowed: bool) {
        if let Some(cache) = &self.cache {
            cache.lock().put(DecisionKey::new(role, resource, action), allowed);
        }
    }

    /// Clear the cache
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    /// Number of cached decisions
    pub fn len(&self) -> usize {
        self.cache.as_ref().map(|c| c.lock().len()).unwrap_or(0)
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of decisions kept
    pub fn capacity(&self) -> usize {
        self.cache.as_ref().map(|c| c.lock().cap().get()).unwrap_or(0)
    }
}

impl std::fmt::Debug for DecisionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionCache")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}
