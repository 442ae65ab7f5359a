//! Login and token refresh handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use roster_core::AccountService;

use crate::extract::{AuthClaims, Json, TokenKind, ValidateJson};
use crate::handler::Result;
use crate::handler::request::{Login, Refresh};
use crate::handler::response::Session;
use crate::service::{ServiceState, SessionKeys};
use crate::utility::tracing_targets::TRACING_TARGET_AUTHENTICATION;

/// Exchanges credentials for a token pair.
#[tracing::instrument(skip_all)]
async fn login(
    State(accounts): State<AccountService>,
    ValidateJson(request): ValidateJson<Login>,
) -> Result<(StatusCode, Json<Session>)> {
    let session = accounts.login(&request.email, &request.password).await?;

    tracing::info!(
        target: TRACING_TARGET_AUTHENTICATION,
        account_id = %session.account.id,
        "login succeeded"
    );

    Ok((StatusCode::OK, Json(session)))
}

/// Exchanges a refresh token for a new token pair.
///
/// The account must still exist and be active.
#[tracing::instrument(skip_all)]
async fn refresh(
    State(accounts): State<AccountService>,
    State(session_keys): State<SessionKeys>,
    ValidateJson(request): ValidateJson<Refresh>,
) -> Result<(StatusCode, Json<Session>)> {
    let claims = AuthClaims::decode(
        &request.refresh_token,
        session_keys.decoding_key(),
        TokenKind::Refresh,
    )?;

    let session = accounts.reissue(claims.account_id).await?;

    tracing::info!(
        target: TRACING_TARGET_AUTHENTICATION,
        account_id = %claims.account_id,
        token_id = %claims.token_id,
        "session refreshed"
    );

    Ok((StatusCode::OK, Json(session)))
}

/// Returns a [`Router`] with all authentication routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/accounts/users/login", post(login))
        .route("/accounts/users/refresh", post(refresh))
}

#[cfg(test)]
mod tests {
    use axum::http::header::AUTHORIZATION;
    use serde_json::json;

    use super::*;
    use crate::handler::test::{bearer, create_test_server, login, register};

    const LOGIN: &str = "/api/v1/accounts/users/login";
    const REFRESH: &str = "/api/v1/accounts/users/refresh";

    #[tokio::test]
    async fn login_returns_bearer_session() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;
        let john = register(&server, "john@example.com", "+1 123456789").await?;

        let response = server
            .post(LOGIN)
            .json(&json!({
                "email": "john@example.com",
                "password": "correct horse battery staple",
            }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["user"]["id"], john.id.to_string());
        assert_eq!(body["token_type"], "Bearer");
        assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
        assert!(body["refresh_token"].as_str().is_some_and(|t| !t.is_empty()));
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_alike() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;
        register(&server, "john@example.com", "+1 123456789").await?;

        let wrong_password = server
            .post(LOGIN)
            .json(&json!({ "email": "john@example.com", "password": "nope" }))
            .await;
        wrong_password.assert_status_unauthorized();

        let unknown_email = server
            .post(LOGIN)
            .json(&json!({ "email": "ghost@example.com", "password": "nope" }))
            .await;
        unknown_email.assert_status_unauthorized();

        assert_eq!(
            wrong_password.json::<serde_json::Value>(),
            unknown_email.json::<serde_json::Value>()
        );
        Ok(())
    }

    #[tokio::test]
    async fn blank_credentials_are_bad_request() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;

        server
            .post(LOGIN)
            .json(&json!({ "email": "", "password": "" }))
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn refresh_issues_new_pair() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;
        let john = register(&server, "john@example.com", "+1 123456789").await?;
        let session = login(&server, "john@example.com").await?;

        let response = server
            .post(REFRESH)
            .json(&json!({ "refresh_token": session.refresh_token }))
            .await;
        response.assert_status_ok();

        let refreshed: Session = response.json();
        assert_eq!(refreshed.account.id, john.id);
        assert_ne!(refreshed.refresh_token, session.refresh_token);

        server
            .get(&format!("/api/v1/accounts/users/{}", john.id))
            .add_header(AUTHORIZATION, bearer(&refreshed)?)
            .await
            .assert_status_ok();
        Ok(())
    }

    #[tokio::test]
    async fn token_kinds_are_not_interchangeable() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;
        let john = register(&server, "john@example.com", "+1 123456789").await?;
        let session = login(&server, "john@example.com").await?;

        server
            .post(REFRESH)
            .json(&json!({ "refresh_token": session.access_token }))
            .await
            .assert_status_unauthorized();

        server
            .get(&format!("/api/v1/accounts/users/{}", john.id))
            .add_header(AUTHORIZATION, format!("Bearer {}", session.refresh_token))
            .await
            .assert_status_unauthorized();
        Ok(())
    }
}
