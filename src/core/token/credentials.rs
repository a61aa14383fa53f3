//! `Authorization` header parsing and key request bodies

use crate::error::{AuthError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP Basic credentials
///
/// Only the password is checked against the admin hash; the username is kept
/// for logging.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Parse a `Basic <base64(user:password)>` header value
    ///
    /// Any malformation is reported as `Unauthorized`.
    pub fn from_basic_header(value: &str) -> Result<Self> {
        let encoded = strip_scheme(value, "Basic").ok_or(AuthError::Unauthorized)?;
        let decoded = STANDARD
            .decode(encoded)
            .map_err(|_| AuthError::Unauthorized)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::Unauthorized)?;

        let (username, password) = decoded.split_once(':').ok_or(AuthError::Unauthorized)?;

        Ok(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token taken from a `Bearer <token>` header value
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Parse a `Bearer <token>` header value
    ///
    /// A missing scheme or empty token is reported as `InvalidToken`.
    pub fn from_header(value: &str) -> Result<Self> {
        let token = strip_scheme(value, "Bearer").ok_or(AuthError::InvalidToken)?;
        Ok(BearerToken(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Case-insensitive scheme match; returns the trimmed, non-empty remainder
fn strip_scheme<'a>(value: &'a str, scheme: &str) -> Option<&'a str> {
    let value = value.trim();
    let (head, rest) = value.split_once(' ')?;
    if !head.eq_ignore_ascii_case(scheme) {
        return None;
    }
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

/// Body of an issue or refresh request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRequest {
    /// Requested role; ignored on refresh
    #[serde(default)]
    pub role: String,

    /// Lifetime in seconds
    pub expiry: i64,
}

impl KeyRequest {
    pub fn new(role: impl Into<String>, expiry: i64) -> Self {
        KeyRequest {
            role: role.into(),
            expiry,
        }
    }

    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| AuthError::MalformedRequest(e.to_string()))
    }
}

/// Body returned for a freshly sealed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyResponse {
    pub key: String,
}

impl KeyResponse {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| AuthError::Internal(e.to_string()))
    }
}
