//! Self-contained access tokens
//!
//! A token is `base64(nonce ‖ AES-GCM(ClaimRecord JSON))`. Everything needed
//! to validate it travels with it: there is no server-side store, so a token
//! stays valid until its own expiry.

mod claims;
mod credentials;

pub use claims::ClaimRecord;
pub use credentials::{BearerToken, Credentials, KeyRequest, KeyResponse};

use crate::encryption::TokenCipher;
use crate::error::{AuthError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

/// Seals claims into tokens and opens them again
#[derive(Debug, Clone)]
pub struct TokenSealer {
    cipher: TokenCipher,
}

impl TokenSealer {
    pub fn new(cipher: TokenCipher) -> Self {
        TokenSealer { cipher }
    }

    /// Sealer keyed from the configured secret string
    pub fn from_secret(secret: &str) -> Self {
        Self::new(TokenCipher::new(secret))
    }

    /// Encrypt and encode a claim
    pub fn seal(&self, claim: &ClaimRecord) -> Result<String> {
        let payload = claim.to_json()?;
        let sealed = self.cipher.encrypt(&payload)?;
        Ok(STANDARD.encode(sealed))
    }

    /// Decode and decrypt a token without checking its expiry
    ///
    /// Bad base64, failed authentication and unparseable payloads all yield
    /// `InvalidToken`.
    pub fn open(&self, token: &str) -> Result<ClaimRecord> {
        let sealed = STANDARD.decode(token.trim()).map_err(|_| {
            debug!("token is not valid base64");
            AuthError::InvalidToken
        })?;
        let payload = self.cipher.decrypt(&sealed)?;
        ClaimRecord::from_json(&payload).map_err(|e| {
            debug!("token payload is not a claim record");
            e
        })
    }
}
