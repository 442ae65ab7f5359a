#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;
mod telemetry;

use std::process;

use anyhow::Context;
use axum::Router;
use roster_core::account::RegisterAccount;
use roster_server::handler::routes;
use roster_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};
use roster_server::service::ServiceState;

use crate::config::{Cli, Command, MiddlewareConfig, SuperuserArgs};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "roster_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "roster_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "roster_cli::config";
pub const TRACING_TARGET_ADMIN: &str = "roster_cli::admin";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing(&cli.telemetry)?;
    cli.log();
    cli.validate().context("invalid configuration")?;

    let state = ServiceState::from_config(&cli.service)
        .await
        .context("failed to create service state")?;

    match cli.command() {
        Command::Serve => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_STARTUP,
                version = env!("CARGO_PKG_VERSION"),
                "starting roster server"
            );

            let router = create_router(state, &cli.middleware);
            server::serve(router, cli.server).await?;
        }
        Command::CreateSuperuser(args) => create_superuser(&state, args).await?,
    }

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// The last layer added is the outermost:
/// 1. Recovery catches panics and enforces timeouts.
/// 2. Observability assigns request ids and opens tracing spans.
/// 3. Security applies the CORS policy.
/// 4. Routes handle the request.
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes()
        .with_state(state)
        .with_security(&middleware.cors)
        .with_observability()
        .with_recovery(&middleware.recovery)
}

/// Provisions an administrator account.
async fn create_superuser(state: &ServiceState, args: SuperuserArgs) -> anyhow::Result<()> {
    let account = state
        .accounts
        .create_superuser(RegisterAccount::from(args))
        .await
        .context("failed to create superuser")?;

    tracing::info!(
        target: TRACING_TARGET_ADMIN,
        account_id = %account.id,
        email = %account.email,
        "superuser created"
    );

    println!("Superuser {} created with id {}", account.email, account.id);
    Ok(())
}
