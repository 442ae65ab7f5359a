//! Access and refresh token issuing.

use std::fmt;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use jiff::SignedDuration;
use roster_core::security::{TokenIssuer, TokenPair};
use roster_core::{Account, Error, Result};
use serde::{Deserialize, Serialize};

use super::SessionKeys;
use crate::extract::{AuthClaims, TokenKind};
use crate::utility::tracing_targets::TRACING_TARGET_SESSION_KEYS as TRACING_TARGET;

/// Token lifetime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
pub struct TokenConfig {
    /// Access token lifetime in seconds.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "ACCESS_TOKEN_TTL_SECS", default_value = "300")
    )]
    pub access_token_ttl_secs: u32,

    /// Refresh token lifetime in seconds.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "REFRESH_TOKEN_TTL_SECS", default_value = "86400")
    )]
    pub refresh_token_ttl_secs: u32,
}

impl TokenConfig {
    /// Returns the access token lifetime.
    #[inline]
    pub fn access_ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::from(self.access_token_ttl_secs))
    }

    /// Returns the refresh token lifetime.
    #[inline]
    pub fn refresh_ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::from(self.refresh_token_ttl_secs))
    }

    /// Fails if a lifetime is zero or refresh tokens expire before access tokens.
    pub fn validate(&self) -> crate::Result<()> {
        if self.access_token_ttl_secs == 0 || self.refresh_token_ttl_secs == 0 {
            return Err(crate::Error::config("token lifetimes must be positive"));
        }

        if self.refresh_token_ttl_secs < self.access_token_ttl_secs {
            return Err(crate::Error::config(
                "refresh token lifetime must not be shorter than access token lifetime",
            ));
        }

        Ok(())
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_ttl_secs: 5 * 60,
            refresh_token_ttl_secs: 24 * 60 * 60,
        }
    }
}

/// Issues EdDSA-signed access and refresh tokens.
#[derive(Clone)]
pub struct JwtIssuer {
    keys: SessionKeys,
    config: TokenConfig,
}

impl JwtIssuer {
    /// Creates a new issuer.
    pub fn new(keys: SessionKeys, config: TokenConfig) -> Self {
        Self { keys, config }
    }

    fn sign(&self, account: &Account, kind: TokenKind, ttl: SignedDuration) -> Result<String> {
        let claims = AuthClaims::new(account, kind, ttl)?;
        claims.encode(self.keys.encoding_key()).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                account_id = %account.id,
                token_kind = %kind,
                "failed to sign token"
            );
            Error::internal("jwt", "failed to sign token").with_source(e)
        })
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, account: &Account) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.sign(account, TokenKind::Access, self.config.access_ttl())?,
            refresh_token: self.sign(account, TokenKind::Refresh, self.config.refresh_ttl())?,
        })
    }
}

impl fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtIssuer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
