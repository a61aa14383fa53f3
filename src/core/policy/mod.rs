//! Role-based access control for gateway endpoints
//!
//! Provides:
//! - A fixed role hierarchy with transitive inheritance
//! - An immutable allow-only rule table
//! - Key-pattern resources and regex action patterns
//! - LRU caching of decisions

mod cache;
mod engine;
mod role;
mod rule;
mod set;
pub mod table;

pub use cache::DecisionCache;
pub use engine::{PolicyEngine, DEFAULT_CACHE_CAPACITY};
pub use role::{Role, RoleHierarchy};
pub use rule::{ActionPattern, ResourcePattern, Rule, RuleSpec, VERSION_PREFIX};
pub use set::{PolicySet, PolicySpec};
