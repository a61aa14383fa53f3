//! # Gatehouse - Authorization Core for a Two-Perimeter API Gateway
//!
//! `gatehouse` decides whether a request may reach the node behind the gateway.
//! A request passes three checks:
//!
//! - **Perimeter**: the internal listener admits only allow-listed paths, the
//!   external listener rejects deny-listed ones
//! - **Token**: a self-contained AES-256-GCM sealed claim carrying a role and
//!   an expiry, issued against the admin password
//! - **Policy**: allow-only RBAC rules over a role hierarchy
//!   (`consumer` < `creator` < `accountant` < `maintainer`)
//!
//! ## Quick Start
//!
//! ```rust
//! use gatehouse::{PolicyEngine, Result};
//!
//! # fn main() -> Result<()> {
//! let engine = PolicyEngine::builtin()?;
//!
//! assert!(engine.enforce("consumer", "/bytes/122", "GET"));
//! assert!(!engine.enforce("consumer", "/chequebook/withdraw", "POST"));
//! assert!(engine.enforce("accountant", "/v1/chequebook/withdraw", "POST"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Full Request Flow
//!
//! ```rust,no_run
//! use gatehouse::{GatehouseConfig, Gatekeeper, KeyRequest, Listener};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = GatehouseConfig::load("gatehouse.toml")?;
//! let gatekeeper = Gatekeeper::from_config(&config)?;
//!
//! // Admin login mints a token
//! let issued = gatekeeper.issue_key("Basic YWRtaW46c2VjcmV0", &KeyRequest::new("creator", 3600))?;
//!
//! // Each proxied request is checked at the perimeter, then against the policy
//! if gatekeeper.admits(Listener::External, "/bytes") {
//!     gatekeeper.authorize(&issued.key, "/bytes", "POST")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;

pub use crate::core::{acl, auth, config, encryption, error, gatekeeper, policy, token};

pub use crate::core::{
    acl::{Listener, PathMatcher, Perimeter},
    auth::{hash_password, AdminPassword, Authenticator},
    config::{ConfigError, GatehouseConfig},
    encryption::TokenCipher,
    error::{AuthError, Result},
    gatekeeper::Gatekeeper,
    policy::{PolicyEngine, PolicySet, PolicySpec, Role, RoleHierarchy, RuleSpec},
    token::{BearerToken, ClaimRecord, Credentials, KeyRequest, KeyResponse, TokenSealer},
};
