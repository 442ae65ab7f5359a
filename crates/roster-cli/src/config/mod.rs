//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── command: Command             # serve (default) or create-superuser
//! ├── server: ServerConfig         # Host, port, shutdown
//! ├── middleware: MiddlewareConfig # CORS, request timeout
//! ├── service: ServiceConfig       # Store backend, keys, token lifetimes
//! └── telemetry: TelemetryConfig   # Log format
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.

mod middleware;
mod server;
mod superuser;
mod telemetry;

use std::process;

use clap::{Parser, Subcommand};
pub use middleware::MiddlewareConfig;
use roster_server::service::{ServiceConfig, StoreBackend};
pub use server::ServerConfig;
pub use superuser::SuperuserArgs;
pub use telemetry::{LogFormat, TelemetryConfig};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "roster")]
#[command(about = "User account service")]
#[command(version)]
pub struct Cli {
    /// Operation to run. Serves the HTTP API when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Account store, session keys and token configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Log output configuration.
    #[clap(flatten)]
    pub telemetry: TelemetryConfig,
}

/// Operations exposed by the binary.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serves the HTTP API.
    Serve,
    /// Creates an account with the admin and superuser flags set.
    CreateSuperuser(SuperuserArgs),
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so that clap picks its values up as
    /// environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Returns the selected command, defaulting to [`Command::Serve`].
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server.validate()?;
        self.middleware.validate()?;
        self.service.validate()?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "build information"
        );

        self.server.log();
        self.middleware.log();

        match self.service.store_backend {
            StoreBackend::Postgres => tracing::info!(
                target: TRACING_TARGET_CONFIG,
                backend = %self.service.store_backend,
                postgres_url = %self.service.postgres.database_url_masked(),
                postgres_max_connections = self.service.postgres.postgres_max_connections,
                access_token_ttl_secs = self.service.tokens.access_token_ttl_secs,
                refresh_token_ttl_secs = self.service.tokens.refresh_token_ttl_secs,
                password_min_score = self.service.password_min_score,
                "service configuration"
            ),
            StoreBackend::Memory => tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                backend = %self.service.store_backend,
                access_token_ttl_secs = self.service.tokens.access_token_ttl_secs,
                refresh_token_ttl_secs = self.service.tokens.refresh_token_ttl_secs,
                password_min_score = self.service.password_min_score,
                "service configuration: accounts are kept in memory and lost on exit"
            ),
        }
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
