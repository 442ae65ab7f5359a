//! Server lifecycle: startup logging, graceful shutdown and its deadline.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Notify;

use super::{ServerError, ServerResult, shutdown_signal};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Future handed to the server; resolves when draining should begin.
pub(super) type GracefulShutdown = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Runs the server future until a process signal, then gives in-flight
/// requests up to the configured shutdown timeout.
pub(super) async fn serve_with_shutdown<F, Fut>(
    server_config: &ServerConfig,
    serve_fn: F,
) -> ServerResult<()>
where
    F: FnOnce(GracefulShutdown) -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    serve_until(server_config, shutdown_signal(), serve_fn).await
}

async fn serve_until<S, F, Fut>(
    server_config: &ServerConfig,
    signal: S,
    serve_fn: F,
) -> ServerResult<()>
where
    S: Future<Output = ()> + Send + 'static,
    F: FnOnce(GracefulShutdown) -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    let start_time = Instant::now();

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_config.server_addr(),
        "server is ready and listening for connections"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "server bound to all interfaces, ensure firewall is configured"
        );
    }

    let draining = Arc::new(Notify::new());
    let graceful: GracefulShutdown = {
        let draining = Arc::clone(&draining);
        Box::pin(async move {
            signal.await;
            draining.notify_one();
        })
    };

    let deadline = async {
        draining.notified().await;
        tokio::time::sleep(server_config.shutdown_timeout()).await;
    };

    let result = tokio::select! {
        result = serve_fn(graceful) => result.map_err(ServerError::Runtime),
        () = deadline => Err(ServerError::ShutdownTimeout(server_config.shutdown_timeout)),
    };

    handle_result(result, start_time)
}

/// Logs the outcome of a server run.
fn handle_result(result: ServerResult<()>, start_time: Instant) -> ServerResult<()> {
    let uptime = start_time.elapsed();

    match result {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                uptime_secs = uptime.as_secs(),
                "shutdown completed"
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                uptime_secs = uptime.as_secs(),
                suggestion = err.suggestion(),
                "fatal server error"
            );
            Err(err)
        }
    }
}
