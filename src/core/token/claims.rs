//! Claim record carried inside a sealed token

use crate::error::{AuthError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Role and expiry carried by a token
///
/// Serialized with the short keys `r` and `e`; the expiry is an RFC 3339
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    #[serde(rename = "r")]
    pub role: String,

    #[serde(rename = "e")]
    pub expires_at: DateTime<Utc>,
}

impl ClaimRecord {
    pub fn new(role: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        ClaimRecord {
            role: role.into(),
            expires_at,
        }
    }

    /// Claim for `role` expiring `expiry_seconds` after `now`
    ///
    /// # Errors
    ///
    /// Returns `InvalidExpiry` for non-positive durations and for durations
    /// that overflow the timestamp range.
    pub fn expiring_in(
        role: impl Into<String>,
        expiry_seconds: i64,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if expiry_seconds <= 0 {
            return Err(AuthError::InvalidExpiry);
        }

        let expires_at = Duration::try_seconds(expiry_seconds)
            .and_then(|d| now.checked_add_signed(d))
            .ok_or(AuthError::InvalidExpiry)?;

        Ok(Self::new(role, expires_at))
    }

    /// A claim is expired once `now` is strictly past its expiry
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| AuthError::Internal(format!("claim encoding: {}", e)))
    }

    /// Parse a claim; only the keyed object form is accepted
    pub fn from_json(data: &[u8]) -> Result<Self> {
        match serde_json::from_slice(data) {
            Ok(value @ serde_json::Value::Object(_)) => {
                serde_json::from_value(value).map_err(|_| AuthError::InvalidToken)
            }
            _ => Err(AuthError::InvalidToken),
        }
    }
}
