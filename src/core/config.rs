//! Gateway configuration
//!
//! Loaded from a TOML file. Every section is optional: a missing file, or a
//! file that leaves a section out, falls back to the built-in defaults.
//!
//! ```toml
//! internal_port = 1643
//! external_port = 1645
//! ingress_url = "http://localhost:1633"
//!
//! [auth]
//! encryption_key = "change-me"
//! admin_password_hash = "$argon2id$v=19$..."
//!
//! [policy]
//! decision_cache_capacity = 1000
//!
//! [acl]
//! deny = ["/node", "/health"]
//! ```

use crate::acl::lists::{EXTERNAL_DENY_LIST, INTERNAL_ALLOW_LIST};
use crate::acl::{PathMatcher, Perimeter};
use crate::error::AuthError;
use crate::policy::{PolicySet, PolicySpec, RuleSpec, DEFAULT_CACHE_CAPACITY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use url::Url;

pub const DEFAULT_INTERNAL_PORT: u16 = 1643;
pub const DEFAULT_EXTERNAL_PORT: u16 = 1645;
pub const DEFAULT_INGRESS_URL: &str = "http://localhost:1633";

const REDACTED: &str = "<redacted>";

/// Errors raised while loading or applying configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ConfigError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ConfigError::Validation(msg.into())
    }
}

/// Top-level gateway configuration
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatehouseConfig {
    /// Port of the trusted listener
    pub internal_port: u16,

    /// Port of the public listener
    pub external_port: u16,

    /// Upstream the gateway forwards admitted requests to
    pub ingress_url: String,

    pub auth: AuthConfig,
    pub policy: PolicyConfig,
    pub acl: AclConfig,
}

impl Default for GatehouseConfig {
    fn default() -> Self {
        GatehouseConfig {
            internal_port: DEFAULT_INTERNAL_PORT,
            external_port: DEFAULT_EXTERNAL_PORT,
            ingress_url: DEFAULT_INGRESS_URL.to_string(),
            auth: AuthConfig::default(),
            policy: PolicyConfig::default(),
            acl: AclConfig::default(),
        }
    }
}

/// Secrets for token sealing and admin login
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Shared secret the token key is derived from
    pub encryption_key: String,

    /// Argon2 PHC string of the admin password
    pub admin_password_hash: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("encryption_key", &REDACTED)
            .field("admin_password_hash", &REDACTED)
            .finish()
    }
}

/// Decision cache size and an optional replacement rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    pub decision_cache_capacity: usize,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inherits: Vec<(String, String)>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleSpec>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            decision_cache_capacity: DEFAULT_CACHE_CAPACITY,
            roles: Vec::new(),
            inherits: Vec::new(),
            rules: Vec::new(),
        }
    }
}

impl PolicyConfig {
    /// The configured table, or `None` to use the built-in one
    ///
    /// Setting any of `roles`, `inherits` or `rules` replaces the built-in
    /// table as a whole.
    pub fn spec(&self) -> Option<PolicySpec> {
        if self.roles.is_empty() && self.inherits.is_empty() && self.rules.is_empty() {
            return None;
        }
        Some(PolicySpec {
            roles: self.roles.clone(),
            inherits: self.inherits.clone(),
            rules: self.rules.clone(),
        })
    }

    /// Compile the configured table, falling back to the built-in one
    pub fn build(&self) -> Result<PolicySet, ConfigError> {
        let set = match self.spec() {
            Some(spec) => PolicySet::from_spec(&spec)?,
            None => PolicySet::builtin()?,
        };
        Ok(set)
    }
}

/// Optional replacements for the perimeter pattern lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AclConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deny: Option<Vec<String>>,
}

impl AclConfig {
    /// Internal listener allow-list
    pub fn allow_matcher(&self) -> PathMatcher {
        match &self.allow {
            Some(patterns) => PathMatcher::new(patterns),
            None => PathMatcher::new(INTERNAL_ALLOW_LIST),
        }
    }

    /// External listener deny-list
    pub fn deny_matcher(&self) -> PathMatcher {
        match &self.deny {
            Some(patterns) => PathMatcher::new(patterns),
            None => PathMatcher::new(EXTERNAL_DENY_LIST),
        }
    }

    /// Both listeners' lists; needs no secrets
    pub fn perimeter(&self) -> Perimeter {
        Perimeter::new(self.allow_matcher(), self.deny_matcher())
    }
}

impl GatehouseConfig {
    /// Load configuration from a TOML file
    ///
    /// A file that does not exist yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.internal_port == self.external_port {
            return Err(ConfigError::validation(format!(
                "internal and external listeners share port {}",
                self.internal_port
            )));
        }

        let ingress = Url::parse(&self.ingress_url).map_err(|e| {
            ConfigError::validation(format!("invalid ingress_url '{}': {}", self.ingress_url, e))
        })?;
        if !matches!(ingress.scheme(), "http" | "https") {
            return Err(ConfigError::validation(format!(
                "ingress_url must use http:// or https://, got '{}'",
                ingress.scheme()
            )));
        }
        if ingress.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::validation("ingress_url has no host"));
        }

        if self.auth.encryption_key.is_empty() {
            return Err(ConfigError::validation("auth.encryption_key must be set"));
        }

        Ok(())
    }

    /// Copy with secrets replaced, suitable for printing
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.auth.encryption_key.is_empty() {
            copy.auth.encryption_key = REDACTED.to_string();
        }
        if !copy.auth.admin_password_hash.is_empty() {
            copy.auth.admin_password_hash = REDACTED.to_string();
        }
        copy
    }

    /// Render as TOML with secrets redacted
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(&self.redacted())
            .map_err(|e| ConfigError::Auth(AuthError::Internal(e.to_string())))
    }
}

impl fmt::Debug for GatehouseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatehouseConfig")
            .field("internal_port", &self.internal_port)
            .field("external_port", &self.external_port)
            .field("ingress_url", &self.ingress_url)
            .field("auth", &self.auth)
            .field("policy", &self.policy)
            .field("acl", &self.acl)
            .finish()
    }
}
