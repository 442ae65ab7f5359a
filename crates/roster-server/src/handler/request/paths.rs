//! Path parameter types for HTTP handlers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path parameters for single-account operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountPathParams {
    /// Unique identifier of the account.
    pub account_id: Uuid,
}
