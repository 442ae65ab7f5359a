//! Password hashing and verification using Argon2id.

use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};
use rand::Rng;
use roster_core::{Error, Result};

use crate::utility::tracing_targets::TRACING_TARGET_PASSWORD_HASHER as TRACING_TARGET;

/// Argon2id password hasher.
///
/// Produces PHC strings (`$argon2id$...`) that embed the parameters and salt.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a new hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes `password` with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>()).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to encode password salt"
            );
            Error::internal("argon2", "salt generation failed")
        })?;

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing operation failed"
                );
                Error::internal("argon2", "password hashing failed")
            })?;

        Ok(password_hash.to_string())
    }

    /// Returns `true` if `password` matches `stored_hash`.
    ///
    /// A hash that cannot be parsed is an internal error, not a mismatch.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "stored password hash has an invalid format"
            );
            Error::internal("argon2", "invalid password hash format")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(ArgonError::Password) => {
                tracing::debug!(target: TRACING_TARGET, "password verification failed");
                Ok(false)
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password verification system error"
                );
                Err(Error::internal("argon2", "password verification failed"))
            }
        }
    }

    /// Hashes a random password and verifies `password` against it.
    ///
    /// Gives logins for unknown emails the same cost as real ones.
    pub fn verify_dummy_password(&self, password: &str) {
        let password_len = rand::random_range(16..32);
        let dummy_password: String = (0..password_len)
            .map(|_| rand::rng().sample(rand::distr::Alphanumeric) as char)
            .collect();

        if let Ok(dummy_hash) = self.hash_password(&dummy_password) {
            let _ = self.verify_password(password, &dummy_hash);
        }
    }
}

impl roster_core::security::PasswordHasher for PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        self.hash_password(password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        self.verify_password(password, hash)
    }

    fn verify_dummy(&self, password: &str) {
        self.verify_dummy_password(password);
    }
}
