//! AES-256-GCM sealing for access tokens
//!
//! Provides authenticated encryption for token payloads with:
//! - AES-256-GCM (Galois/Counter Mode) for encryption
//! - 96-bit random nonces (12 bytes), fresh per call
//! - 128-bit authentication tags for integrity
//! - Key derivation from the configured secret string
//!
//! **Design**:
//! - Key = SHA-256(secret), used directly as the 32-byte AES key
//! - Format: [nonce: 12 bytes][ciphertext][tag: 16 bytes]
//! - Every failure on the decrypt side is reported as `InvalidToken`

use crate::error::{AuthError, Result};
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::debug;

/// Encryption key (32 bytes for AES-256)
pub type EncryptionKey = [u8; 32];

/// Nonce size for AES-GCM (96 bits / 12 bytes)
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size (128 bits / 16 bytes)
pub const TAG_SIZE: usize = 16;

/// Overhead added by encryption (nonce + tag)
pub const ENCRYPTION_OVERHEAD: usize = NONCE_SIZE + TAG_SIZE;

/// Derive the raw AES key from the configured secret
///
/// A single SHA-256 pass; fast and not memory-hard, so the secret itself
/// must carry enough entropy.
pub fn derive_key(secret: &str) -> EncryptionKey {
    let digest = Sha256::digest(secret.as_bytes());
    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    key
}

/// Symmetric AEAD cipher bound to one derived key
#[derive(Clone)]
pub struct TokenCipher {
    cipher: Aes256Gcm,
}

impl TokenCipher {
    /// Build a cipher from the configured secret string
    pub fn new(secret: &str) -> Self {
        Self::from_key(&derive_key(secret))
    }

    /// Build a cipher from raw key material
    pub fn from_key(key: &EncryptionKey) -> Self {
        TokenCipher {
            cipher: Aes256Gcm::new(key.into()),
        }
    }

    /// Encrypt data
    ///
    /// Returns encrypted data with format: [nonce][ciphertext][tag]
    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        // Generate random nonce
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, data)
            .map_err(|e| AuthError::Internal(format!("encryption failed: {}", e)))?;

        // Build output: nonce + ciphertext (which includes tag)
        let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&ciphertext);

        Ok(result)
    }

    /// Decrypt data
    ///
    /// Expects data in format: [nonce][ciphertext][tag]
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() < ENCRYPTION_OVERHEAD {
            debug!(len = data.len(), "sealed payload too short");
            return Err(AuthError::InvalidToken);
        }

        let nonce = Nonce::from_slice(&data[..NONCE_SIZE]);
        let ciphertext = &data[NONCE_SIZE..];

        self.cipher.decrypt(nonce, ciphertext).map_err(|_| {
            debug!("sealed payload failed authentication");
            AuthError::InvalidToken
        })
    }
}

impl fmt::Debug for TokenCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCipher").finish_non_exhaustive()
    }
}
