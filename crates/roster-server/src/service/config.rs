//! Service configuration.

use std::sync::Arc;

#[cfg(any(test, feature = "config"))]
use clap::{Args, ValueEnum};
use roster_core::{AccountStore, MemoryStore};
use roster_postgres::{PgClient, PgClientMigrationExt, PgConfig};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::service::{SessionKeysConfig, TokenConfig};
use crate::utility::tracing_targets::TRACING_TARGET_SERVICE;
use crate::{Error, Result};

/// Where accounts are persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[cfg_attr(any(test, feature = "config"), derive(ValueEnum))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StoreBackend {
    /// PostgreSQL through a connection pool.
    #[default]
    Postgres,
    /// Process-local store. Contents are lost on exit.
    Memory,
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Account store backend.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "STORE_BACKEND", value_enum, default_value_t = StoreBackend::Postgres)
    )]
    pub store_backend: StoreBackend,

    /// Minimum zxcvbn score (0-4) a new password must reach.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "PASSWORD_MIN_SCORE", default_value = "3")
    )]
    pub password_min_score: u8,

    /// Postgres connection settings, used by the `postgres` backend.
    #[cfg_attr(any(test, feature = "config"), command(flatten))]
    pub postgres: PgConfig,

    /// Session key file paths.
    #[cfg_attr(any(test, feature = "config"), command(flatten))]
    pub session_keys: SessionKeysConfig,

    /// Token lifetimes.
    #[cfg_attr(any(test, feature = "config"), command(flatten))]
    pub tokens: TokenConfig,
}

impl ServiceConfig {
    /// Validates settings that do not require I/O.
    pub fn validate(&self) -> Result<()> {
        if self.password_min_score > 4 {
            return Err(Error::config("password_min_score must be between 0 and 4"));
        }

        self.tokens.validate()?;

        if self.store_backend == StoreBackend::Postgres {
            self.postgres
                .validate()
                .map_err(|e| Error::config("invalid postgres configuration").with_source(e))?;
        }

        Ok(())
    }

    /// Opens the configured account store.
    pub async fn open_store(&self) -> Result<Arc<dyn AccountStore>> {
        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            backend = %self.store_backend,
            "opening account store"
        );

        match self.store_backend {
            StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreBackend::Postgres => Ok(Arc::new(self.connect_postgres().await?)),
        }
    }

    /// Connects to Postgres and runs migrations.
    pub async fn connect_postgres(&self) -> Result<PgClient> {
        let pg_client = PgClient::connect(self.postgres.clone()).await?;

        let migrations = pg_client.run_pending_migrations().await?;
        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            applied = migrations.processed_versions.len(),
            duration = ?migrations.duration,
            "database migrations applied"
        );

        Ok(pg_client)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        service: ServiceConfig,
    }

    #[test]
    fn defaults_parse() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["roster"])?;
        assert_eq!(cli.service.password_min_score, 3);
        assert_eq!(cli.service.tokens, TokenConfig::default());
        Ok(())
    }

    #[test]
    fn memory_backend_skips_postgres_validation() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "roster",
            "--store-backend",
            "memory",
            "--postgres-url",
            "",
        ])?;
        assert_eq!(cli.service.store_backend, StoreBackend::Memory);
        assert!(cli.service.validate().is_ok());
        Ok(())
    }

    #[test]
    fn out_of_range_score_is_rejected() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["roster", "--password-min-score", "7"])?;
        assert!(cli.service.validate().is_err());
        Ok(())
    }

    #[tokio::test]
    async fn memory_store_opens() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["roster", "--store-backend", "memory"])?;
        let store = cli.service.open_store().await?;
        assert!(store.health().await.is_operational());
        Ok(())
    }
}
