//! Request-level facade over the perimeter, authenticator and policy engine

use crate::acl::{Listener, Perimeter};
use crate::auth::{AdminPassword, Authenticator};
use crate::config::{ConfigError, GatehouseConfig};
use crate::error::{AuthError, Result};
use crate::policy::PolicyEngine;
use crate::token::{BearerToken, Credentials, KeyRequest, KeyResponse, TokenSealer};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything the two listeners need to admit, authenticate and authorize
/// a request
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    authenticator: Authenticator,
    perimeter: Perimeter,
}

impl Gatekeeper {
    pub fn new(authenticator: Authenticator, perimeter: Perimeter) -> Self {
        Gatekeeper {
            authenticator,
            perimeter,
        }
    }

    /// Validate the configuration and wire up every component
    pub fn from_config(config: &GatehouseConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let password = AdminPassword::from_hash(config.auth.admin_password_hash.as_str())?;
        let sealer = TokenSealer::from_secret(&config.auth.encryption_key);
        let policy = config.policy.build()?;
        let rule_count = policy.rules().len();
        let engine = PolicyEngine::new(policy, config.policy.decision_cache_capacity);

        let perimeter = config.acl.perimeter();

        info!(
            rules = rule_count,
            allow = perimeter.allow_list().len(),
            deny = perimeter.deny_list().len(),
            cache = config.policy.decision_cache_capacity,
            "gatekeeper ready"
        );

        Ok(Self::new(
            Authenticator::new(password, sealer, Arc::new(engine)),
            perimeter,
        ))
    }

    /// Listener-level path check, before any token is looked at
    pub fn admits(&self, listener: Listener, path: &str) -> bool {
        self.perimeter.admits(listener, path)
    }

    /// Issue a token for the requested role
    ///
    /// `authorization` is the raw `Authorization` header value; only the
    /// Basic password is checked.
    pub fn issue_key(&self, authorization: &str, request: &KeyRequest) -> Result<KeyResponse> {
        let credentials = Credentials::from_basic_header(authorization)?;
        if !self.authenticator.authorize(&credentials.password) {
            warn!(username = %credentials.username, "admin password rejected");
            return Err(AuthError::Unauthorized);
        }

        let key = self
            .authenticator
            .generate_key(&request.role, request.expiry)?;
        info!(role = %request.role, expiry = request.expiry, "issued key");
        Ok(KeyResponse { key })
    }

    /// Re-issue the bearer token with the request's expiry
    ///
    /// The role in `request` is ignored; the token keeps its own.
    pub fn refresh_key(&self, authorization: &str, request: &KeyRequest) -> Result<KeyResponse> {
        let token = BearerToken::from_header(authorization)?;
        let key = self
            .authenticator
            .refresh_key(token.as_str(), request.expiry)?;
        debug!(expiry = request.expiry, "refreshed key");
        Ok(KeyResponse { key })
    }

    /// Authorize a request carrying `token`
    ///
    /// A policy denial becomes `PolicyDenied`.
    pub fn authorize(&self, token: &str, resource: &str, method: &str) -> Result<()> {
        if self.authenticator.enforce(token, resource, method)? {
            Ok(())
        } else {
            debug!(resource, method, "request denied by policy");
            Err(AuthError::PolicyDenied)
        }
    }

    /// [`authorize`](Self::authorize) taking a raw `Bearer` header value
    pub fn authorize_header(&self, authorization: &str, resource: &str, method: &str) -> Result<()> {
        let token = BearerToken::from_header(authorization)?;
        self.authorize(token.as_str(), resource, method)
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn perimeter(&self) -> &Perimeter {
        &self.perimeter
    }
}
