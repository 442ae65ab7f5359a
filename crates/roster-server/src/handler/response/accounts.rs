//! Account response types.

use serde::{Deserialize, Serialize};

/// Public account representation returned by every account route.
pub type Account = roster_core::PublicAccount;

/// A list of public accounts.
pub type Accounts = Vec<Account>;

/// Account and bearer tokens returned by login and refresh.
pub type Session = roster_core::Session;

/// Confirmation body returned after a deactivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deactivated {
    pub message: String,
}

impl Deactivated {
    /// Creates a new confirmation body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
