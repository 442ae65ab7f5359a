//! Credential collaborators consumed by the account service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::account::Account;
use crate::error::Result;

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hashes `password` into an opaque, self-describing string.
    fn hash(&self, password: &str) -> Result<String>;

    /// Returns `true` if `password` matches `hash`.
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;

    /// Performs a verification against a throwaway hash so that a login for
    /// an unknown email costs as much as one with a wrong password.
    fn verify_dummy(&self, _password: &str) {}
}

/// A password was rejected by the strength policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct WeakPassword {
    pub message: String,
}

impl WeakPassword {
    /// Creates a new rejection with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Password strength policy.
pub trait PasswordPolicy: Send + Sync {
    /// Accepts or rejects `password`.
    ///
    /// `user_inputs` holds account values (email, names) that a strong
    /// password should not be derived from.
    fn check(&self, password: &str, user_inputs: &[&str]) -> Result<(), WeakPassword>;
}

/// Bearer tokens issued after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues bearer credentials for an authenticated account.
pub trait TokenIssuer: Send + Sync {
    /// Issues an access and refresh token encoding the account identifier.
    fn issue(&self, account: &Account) -> Result<TokenPair>;
}
