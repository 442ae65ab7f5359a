//! Ed25519 key pair used to sign and verify session tokens.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};

use crate::utility::tracing_targets::TRACING_TARGET_SESSION_KEYS as TRACING_TARGET;
use crate::{Error, Result};

/// Key file paths configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
pub struct SessionKeysConfig {
    /// File path to the JWT decoding (public) key.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "AUTH_PUBLIC_PEM_FILEPATH", default_value = "./public.pem")
    )]
    #[serde(default = "SessionKeysConfig::default_decoding_key")]
    pub decoding_key: PathBuf,

    /// File path to the JWT encoding (private) key.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "AUTH_PRIVATE_PEM_FILEPATH", default_value = "./private.pem")
    )]
    #[serde(default = "SessionKeysConfig::default_encoding_key")]
    pub encoding_key: PathBuf,
}

impl SessionKeysConfig {
    /// Creates a configuration from explicit paths.
    pub fn new(decoding_key: impl AsRef<Path>, encoding_key: impl AsRef<Path>) -> Self {
        Self {
            decoding_key: decoding_key.as_ref().to_path_buf(),
            encoding_key: encoding_key.as_ref().to_path_buf(),
        }
    }

    fn default_decoding_key() -> PathBuf {
        "./public.pem".into()
    }

    fn default_encoding_key() -> PathBuf {
        "./private.pem".into()
    }

    fn validate(&self) -> Result<()> {
        if !self.decoding_key.is_file() {
            return Err(Error::config(format!(
                "decoding key file not found: {}",
                self.decoding_key.display()
            )));
        }

        if !self.encoding_key.is_file() {
            return Err(Error::config(format!(
                "encoding key file not found: {}",
                self.encoding_key.display()
            )));
        }

        Ok(())
    }
}

/// Keys for signing and verifying session tokens.
///
/// Cheap to clone; all clones share the parsed keys.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    config: SessionKeysConfig,
}

impl SessionKeys {
    /// Loads both PEM files named by `config`.
    pub async fn from_config(config: &SessionKeysConfig) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            target: TRACING_TARGET,
            decoding_key_path = %config.decoding_key.display(),
            encoding_key_path = %config.encoding_key.display(),
            "loading session keys",
        );

        let decoding_pem = read_pem(&config.decoding_key).await?;
        let decoding_key = DecodingKey::from_ed_pem(&decoding_pem)
            .map_err(|e| Error::auth("invalid decoding key PEM format").with_source(e))?;

        let encoding_pem = read_pem(&config.encoding_key).await?;
        let encoding_key = EncodingKey::from_ed_pem(&encoding_pem)
            .map_err(|e| Error::auth("invalid encoding key PEM format").with_source(e))?;

        tracing::info!(target: TRACING_TARGET, "session keys loaded");

        Ok(Self {
            inner: Arc::new(SessionKeysInner {
                decoding_key,
                encoding_key,
                config: config.clone(),
            }),
        })
    }

    /// Loads the keys from explicit file paths.
    pub async fn new(
        decoding_pem_key: impl AsRef<Path>,
        encoding_pem_key: impl AsRef<Path>,
    ) -> Result<Self> {
        let config = SessionKeysConfig::new(decoding_pem_key, encoding_pem_key);
        Self::from_config(&config).await
    }

    /// Returns the key used to verify tokens.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns the key used to sign tokens.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Returns the configuration the keys were loaded from.
    #[inline]
    pub fn config(&self) -> &SessionKeysConfig {
        &self.inner.config
    }
}

async fn read_pem(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| {
        tracing::error!(
            target: TRACING_TARGET,
            path = %path.display(),
            error = %e,
            "failed to read key file",
        );
        Error::file_system(format!("failed to read key file: {}", path.display())).with_source(e)
    })
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
