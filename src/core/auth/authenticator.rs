//! Token issuance, refresh and enforcement

use super::AdminPassword;
use crate::error::{AuthError, Result};
use crate::policy::PolicyEngine;
use crate::token::{ClaimRecord, TokenSealer};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// Issues and validates sealed role tokens
///
/// Holds no mutable state: issuing or refreshing a token never changes the
/// authenticator, and an old token stays valid after a refresh until its own
/// expiry.
#[derive(Debug, Clone)]
pub struct Authenticator {
    password: AdminPassword,
    sealer: TokenSealer,
    policy: Arc<PolicyEngine>,
}

impl Authenticator {
    pub fn new(password: AdminPassword, sealer: TokenSealer, policy: Arc<PolicyEngine>) -> Self {
        Authenticator {
            password,
            sealer,
            policy,
        }
    }

    /// Check the admin password
    pub fn authorize(&self, candidate: &str) -> bool {
        self.password.verify(candidate)
    }

    /// Seal a new token for `role` valid for `expiry_seconds`
    ///
    /// The role is not checked against the hierarchy here; a token for an
    /// unknown role is simply denied at enforcement.
    pub fn generate_key(&self, role: &str, expiry_seconds: i64) -> Result<String> {
        let claim = ClaimRecord::expiring_in(role, expiry_seconds, Utc::now())?;
        debug!(role, expires_at = %claim.expires_at, "issuing token");
        self.sealer.seal(&claim)
    }

    /// Re-issue a still-valid token with a new expiry, keeping its role
    pub fn refresh_key(&self, token: &str, expiry_seconds: i64) -> Result<String> {
        if expiry_seconds <= 0 {
            return Err(AuthError::InvalidExpiry);
        }

        let claim = self.open_valid(token)?;
        let refreshed = ClaimRecord::expiring_in(claim.role, expiry_seconds, Utc::now())?;
        debug!(role = %refreshed.role, expires_at = %refreshed.expires_at, "refreshing token");
        self.sealer.seal(&refreshed)
    }

    /// Decide whether the token's role may perform `action` on `resource`
    ///
    /// Returns `Ok(false)` when the policy denies, including for roles the
    /// hierarchy does not know.
    pub fn enforce(&self, token: &str, resource: &str, action: &str) -> Result<bool> {
        let claim = self.open_valid(token)?;
        Ok(self.policy.enforce(&claim.role, resource, action))
    }

    /// Open a token and reject it if expired
    pub fn open_valid(&self, token: &str) -> Result<ClaimRecord> {
        let claim = self.sealer.open(token)?;
        if claim.is_expired_at(Utc::now()) {
            warn!(role = %claim.role, expired_at = %claim.expires_at, "token expired");
            return Err(AuthError::TokenExpired);
        }
        Ok(claim)
    }

    pub fn sealer(&self) -> &TokenSealer {
        &self.sealer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;
    use chrono::Duration;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            AdminPassword::from_hash(hash_password("admin-pass").unwrap()).unwrap(),
            TokenSealer::from_secret("unit-test-secret"),
            Arc::new(PolicyEngine::builtin().unwrap()),
        )
    }

    fn expired_token(auth: &Authenticator, role: &str) -> String {
        let claim = ClaimRecord::new(role, Utc::now() - Duration::seconds(1));
        auth.sealer().seal(&claim).unwrap()
    }

    #[test]
    fn test_authorize() {
        let auth = authenticator();
        assert!(auth.authorize("admin-pass"));
        assert!(!auth.authorize("admin-pas"));
    }

    #[test]
    fn test_generate_key_round_trip() {
        let auth = authenticator();
        let before = Utc::now();
        let token = auth.generate_key("creator", 3600).unwrap();
        let after = Utc::now();

        let claim = auth.sealer().open(&token).unwrap();
        assert_eq!(claim.role, "creator");
        assert!(claim.expires_at >= before + Duration::seconds(3600));
        assert!(claim.expires_at <= after + Duration::seconds(3600));
    }

    #[test]
    fn test_generate_key_rejects_bad_expiry() {
        let auth = authenticator();
        assert_eq!(auth.generate_key("creator", 0), Err(AuthError::InvalidExpiry));
        assert_eq!(auth.generate_key("creator", -1), Err(AuthError::InvalidExpiry));
    }

    #[test]
    fn test_refresh_keeps_role_and_moves_expiry() {
        let auth = authenticator();
        let original = auth.generate_key("accountant", 10).unwrap();

        let before = Utc::now();
        let refreshed = auth.refresh_key(&original, 7200).unwrap();
        let after = Utc::now();

        let claim = auth.sealer().open(&refreshed).unwrap();
        assert_eq!(claim.role, "accountant");
        assert!(claim.expires_at >= before + Duration::seconds(7200));
        assert!(claim.expires_at <= after + Duration::seconds(7200));

        // No revocation: the old token still works
        assert!(auth.enforce(&original, "/chequebook/withdraw", "POST").unwrap());
    }

    #[test]
    fn test_refresh_rejects_expired_token() {
        let auth = authenticator();
        let token = expired_token(&auth, "maintainer");
        assert_eq!(auth.refresh_key(&token, 60), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_refresh_rejects_bad_expiry_before_opening() {
        let auth = authenticator();
        assert_eq!(auth.refresh_key("garbage", 0), Err(AuthError::InvalidExpiry));
        assert_eq!(auth.refresh_key("garbage", 10), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_enforce() {
        let auth = authenticator();
        let consumer = auth.generate_key("consumer", 60).unwrap();

        assert_eq!(auth.enforce(&consumer, "/bytes/abc", "GET"), Ok(true));
        assert_eq!(auth.enforce(&consumer, "/chequebook/withdraw", "POST"), Ok(false));
    }

    #[test]
    fn test_enforce_expired_token() {
        let auth = authenticator();
        let token = expired_token(&auth, "maintainer");
        assert_eq!(auth.enforce(&token, "/bytes/abc", "GET"), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_enforce_unknown_role_is_denied() {
        let auth = authenticator();
        let token = auth.generate_key("superuser", 60).unwrap();
        assert_eq!(auth.enforce(&token, "/bytes/abc", "GET"), Ok(false));
    }

    #[test]
    fn test_token_from_other_key_is_invalid() {
        let auth = authenticator();
        let other = TokenSealer::from_secret("someone-else");
        let token = other
            .seal(&ClaimRecord::new("maintainer", Utc::now() + Duration::seconds(60)))
            .unwrap();
        assert_eq!(auth.enforce(&token, "/peers", "GET"), Err(AuthError::InvalidToken));
    }
}
