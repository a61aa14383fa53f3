//! Admin password hashing and verification using Argon2
//!
//! The admin credential is only used to mint the first token, so the stored
//! value is a PHC string (`$argon2id$v=19$...`). Verification reads the
//! algorithm parameters from the stored string itself.

use crate::error::{AuthError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::fmt;
use tracing::error;

/// Returns an Argon2 instance for hashing new passwords
///
/// Tests use minimal parameters; everything else uses the crate defaults
/// (Argon2id, 19 MiB, 2 iterations).
fn argon2_instance() -> Argon2<'static> {
    #[cfg(test)]
    {
        use argon2::{Algorithm, Params, Version};
        match Params::new(1024, 1, 1, None) {
            Ok(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            Err(_) => Argon2::default(),
        }
    }

    #[cfg(not(test))]
    {
        Argon2::default()
    }
}

/// Hash a password into a PHC string with a random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    argon2_instance()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {}", e)))
}

/// Verifier for the admin password
#[derive(Clone)]
pub struct AdminPassword {
    phc: String,
}

impl AdminPassword {
    /// Wrap a stored PHC hash
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the hash cannot be parsed; this is a
    /// configuration error, not a wrong password.
    pub fn from_hash(phc: impl Into<String>) -> Result<Self> {
        let phc = phc.into();
        PasswordHash::new(&phc)
            .map_err(|e| AuthError::Internal(format!("admin password hash is malformed: {}", e)))?;
        Ok(AdminPassword { phc })
    }

    /// Check a candidate password; comparison is constant-time
    pub fn verify(&self, candidate: &str) -> bool {
        let parsed = match PasswordHash::new(&self.phc) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Validated in from_hash; fail closed regardless
                error!(error = %e, "stored admin password hash became unreadable");
                return false;
            }
        };

        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminPassword(<redacted>)")
    }
}
