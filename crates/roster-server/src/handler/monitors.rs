//! Health check handler.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use roster_core::AccountService;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::MonitorStatus;
use crate::service::ServiceState;
use crate::utility::tracing_targets::TRACING_TARGET_HANDLER;

/// Reports whether the account store is reachable.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(accounts): State<AccountService>,
) -> Result<(StatusCode, Json<MonitorStatus>)> {
    let health = accounts.health().await;

    let status_code = if health.is_operational() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET_HANDLER,
        status = ?health.status,
        latency = ?health.latency,
        status_code = status_code.as_u16(),
        "health status checked"
    );

    Ok((status_code, Json(health.into())))
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use roster_core::StoreStatus;

    use super::*;
    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn memory_store_is_healthy() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;

        let response = server.get("/api/v1/health").await;
        response.assert_status_ok();

        let status: MonitorStatus = response.json();
        assert_eq!(status.status, StoreStatus::Healthy);

        let body: serde_json::Value = response.json();
        assert!(body["checked_at"].is_string());
        assert!(body.get("latency").is_none());
        Ok(())
    }
}
