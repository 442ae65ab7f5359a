//! Authentication request types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for login.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Login {
    /// Email address of the account.
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    /// Password of the account.
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Request payload for a token refresh.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Refresh {
    /// Refresh token issued by a previous login or refresh.
    #[validate(length(min = 1))]
    pub refresh_token: String,
}
