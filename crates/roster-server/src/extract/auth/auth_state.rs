//! Requester resolution.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use derive_more::Deref;
use roster_core::{AccountService, AuthProvider, Error as AccountError, Requester};
use uuid::Uuid;

use super::AuthHeader;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::SessionKeys;

/// Authenticated requester backed by an active account.
///
/// Extraction validates the access token and then loads the account it names.
/// Tokens for deactivated or missing accounts, and tokens whose admin claim no
/// longer matches the account, are rejected with 401.
///
/// As `Option<AuthState>`, a request without an `Authorization` header yields
/// `None` while an invalid token is still rejected.
#[derive(Debug, Clone, Copy, Deref, PartialEq, Eq)]
pub struct AuthState(pub Requester);

impl AuthState {
    /// Resolves the account named by a validated access token.
    pub async fn from_unverified_header(
        auth_header: AuthHeader,
        accounts: &AccountService,
    ) -> Result<Self> {
        let claims = auth_header.into_auth_claims();

        let account = accounts
            .find_active(claims.account_id)
            .await
            .map_err(|error| match error {
                AccountError::NotFound { .. } => {
                    tracing::warn!(
                        target: TRACING_TARGET_AUTHENTICATION,
                        account_id = %claims.account_id,
                        token_id = %claims.token_id,
                        "authentication failed: account inactive or missing"
                    );
                    ErrorKind::Unauthorized
                        .with_message("User not found or inactive")
                        .with_resource("authentication")
                }
                other => Error::from(other),
            })?;

        if claims.is_administrator != account.is_admin {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                account_id = %claims.account_id,
                token_id = %claims.token_id,
                token_admin_claim = claims.is_administrator,
                current_admin_status = account.is_admin,
                "authentication failed: admin privilege changed since issue"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Your account privileges have changed")
                .with_context("Please sign in again to continue")
                .with_resource("authentication"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_id = %account.id,
            is_admin = account.is_admin,
            "requester authenticated"
        );

        Ok(Self(Requester::new(account.id, account.is_admin)))
    }
}

impl AuthProvider for AuthState {
    #[inline]
    fn account_id(&self) -> Uuid {
        self.0.account_id
    }

    #[inline]
    fn is_admin(&self) -> bool {
        self.0.is_admin
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send + 'static,
    AccountService: FromRef<S>,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(*auth_state);
        }

        let auth_header = AuthHeader::from_request_parts(parts, state).await?;
        let accounts = AccountService::from_ref(state);
        let auth_state = Self::from_unverified_header(auth_header, &accounts).await?;

        parts.extensions.insert(auth_state);
        Ok(auth_state)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthState
where
    S: Sync + Send + 'static,
    AccountService: FromRef<S>,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(None);
        }

        <Self as FromRequestParts<S>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}
