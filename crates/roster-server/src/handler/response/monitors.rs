//! Monitor response types.

use jiff::Timestamp;
use roster_core::{StoreHealth, StoreStatus};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorStatus {
    /// Overall status of the account store.
    pub status: StoreStatus,
    /// When the check ran.
    pub checked_at: Timestamp,
}

impl From<StoreHealth> for MonitorStatus {
    fn from(health: StoreHealth) -> Self {
        Self {
            status: health.status,
            checked_at: health.checked_at,
        }
    }
}
