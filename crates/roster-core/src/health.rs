//! Store reachability reports.

use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Whether the account store can serve requests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    #[default]
    Healthy,
    /// Answering, but close to saturation.
    Degraded,
    Unhealthy,
}

/// One probe of the account store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreHealth {
    pub status: StoreStatus,
    /// Round-trip time of the probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub checked_at: Timestamp,
}

impl StoreHealth {
    fn new(status: StoreStatus, detail: Option<String>) -> Self {
        Self {
            status,
            latency: None,
            detail,
            checked_at: Timestamp::now(),
        }
    }

    /// The store answered the probe.
    pub fn healthy() -> Self {
        Self::new(StoreStatus::Healthy, None)
    }

    /// The store answered but is under pressure.
    pub fn degraded(detail: impl Into<String>) -> Self {
        Self::new(StoreStatus::Degraded, Some(detail.into()))
    }

    /// The store did not answer.
    pub fn unhealthy(detail: impl Into<String>) -> Self {
        Self::new(StoreStatus::Unhealthy, Some(detail.into()))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Returns `true` unless the store is unhealthy.
    ///
    /// A degraded store still serves requests.
    pub fn is_operational(&self) -> bool {
        self.status != StoreStatus::Unhealthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_store_is_operational() {
        assert!(StoreHealth::healthy().is_operational());
        assert!(StoreHealth::degraded("pool saturated").is_operational());
        assert!(!StoreHealth::unhealthy("connection refused").is_operational());
    }

    #[test]
    fn detail_is_kept() {
        let health = StoreHealth::healthy()
            .with_latency(Duration::from_millis(3))
            .with_detail("4 rows");

        assert_eq!(health.detail.as_deref(), Some("4 rows"));
        assert_eq!(health.latency, Some(Duration::from_millis(3)));
    }
}
