//! Account management handlers.
//!
//! Registration is public. Reads and updates are limited to the owner or an
//! administrator. Listing and deactivation are limited to administrators.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use roster_core::{AccountService, UpdateMode};

use crate::extract::{AuthState, Json, Path};
use crate::handler::Result;
use crate::handler::request::{AccountBody, AccountPathParams};
use crate::handler::response::{Account, Accounts, Deactivated};
use crate::service::ServiceState;
use crate::utility::tracing_targets::TRACING_TARGET_HANDLER;

/// Lists every active account.
#[tracing::instrument(skip_all)]
async fn list_accounts(
    State(accounts): State<AccountService>,
    auth_state: Option<AuthState>,
) -> Result<(StatusCode, Json<Accounts>)> {
    let listed = accounts.list(auth_state.as_ref()).await?;

    tracing::debug!(
        target: TRACING_TARGET_HANDLER,
        count = listed.len(),
        "accounts listed"
    );

    Ok((StatusCode::OK, Json(listed)))
}

/// Registers a new account.
#[tracing::instrument(skip_all)]
async fn register_account(
    State(accounts): State<AccountService>,
    Json(request): Json<AccountBody>,
) -> Result<(StatusCode, Json<Account>)> {
    let account = accounts.register(request).await?;

    tracing::info!(
        target: TRACING_TARGET_HANDLER,
        account_id = %account.id,
        "account registered"
    );

    Ok((StatusCode::CREATED, Json(account)))
}

/// Returns one account.
#[tracing::instrument(skip_all, fields(account_id = %path_params.account_id))]
async fn read_account(
    State(accounts): State<AccountService>,
    auth_state: Option<AuthState>,
    Path(path_params): Path<AccountPathParams>,
) -> Result<(StatusCode, Json<Account>)> {
    let account = accounts
        .get(auth_state.as_ref(), path_params.account_id)
        .await?;

    Ok((StatusCode::OK, Json(account)))
}

/// Replaces every field of an account.
#[tracing::instrument(skip_all, fields(account_id = %path_params.account_id))]
async fn replace_account(
    State(accounts): State<AccountService>,
    auth_state: Option<AuthState>,
    Path(path_params): Path<AccountPathParams>,
    Json(request): Json<AccountBody>,
) -> Result<(StatusCode, Json<Account>)> {
    update_account(accounts, auth_state, path_params, request, UpdateMode::Full).await
}

/// Changes the supplied fields of an account.
#[tracing::instrument(skip_all, fields(account_id = %path_params.account_id))]
async fn patch_account(
    State(accounts): State<AccountService>,
    auth_state: Option<AuthState>,
    Path(path_params): Path<AccountPathParams>,
    Json(request): Json<AccountBody>,
) -> Result<(StatusCode, Json<Account>)> {
    update_account(
        accounts,
        auth_state,
        path_params,
        request,
        UpdateMode::Partial,
    )
    .await
}

async fn update_account(
    accounts: AccountService,
    auth_state: Option<AuthState>,
    path_params: AccountPathParams,
    request: AccountBody,
    mode: UpdateMode,
) -> Result<(StatusCode, Json<Account>)> {
    let account = accounts
        .update(auth_state.as_ref(), path_params.account_id, request, mode)
        .await?;

    tracing::info!(
        target: TRACING_TARGET_HANDLER,
        account_id = %account.id,
        mode = ?mode,
        "account updated"
    );

    Ok((StatusCode::OK, Json(account)))
}

/// Soft-deletes an account.
#[tracing::instrument(skip_all, fields(account_id = %path_params.account_id))]
async fn deactivate_account(
    State(accounts): State<AccountService>,
    auth_state: Option<AuthState>,
    Path(path_params): Path<AccountPathParams>,
) -> Result<(StatusCode, Json<Deactivated>)> {
    let message = accounts
        .deactivate(auth_state.as_ref(), path_params.account_id)
        .await?;

    tracing::warn!(
        target: TRACING_TARGET_HANDLER,
        account_id = %path_params.account_id,
        "account deactivated"
    );

    Ok((StatusCode::OK, Json(Deactivated::new(message))))
}

/// Returns a [`Router`] with all account routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route(
            "/accounts/users/",
            get(list_accounts).post(register_account),
        )
        .route(
            "/accounts/users/{account_id}",
            get(read_account)
                .put(replace_account)
                .patch(patch_account)
                .delete(deactivate_account),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::header::AUTHORIZATION;
    use serde_json::json;

    use super::*;
    use crate::handler::response::ErrorResponse;
    use crate::handler::test::{
        admin_session, bearer, create_test_server, create_test_server_with_state,
        create_test_state_with_min_score, login, register, registration,
    };

    const USERS: &str = "/api/v1/accounts/users/";

    #[tokio::test]
    async fn register_returns_public_projection() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;

        let response = server
            .post(USERS)
            .json(&registration("JohnDoe@Example.com", "+1 123456789"))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: serde_json::Value = response.json();
        assert_eq!(body["first_name"], "John");
        assert_eq!(body["city"], "New York");
        assert_eq!(body["email"], "JohnDoe@example.com");
        assert_eq!(body["is_admin_user"], false);
        assert!(body.get("password").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn register_reports_every_invalid_field() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;

        let response = server
            .post(USERS)
            .json(&json!({
                "first_name": "J0hn",
                "email": "not-an-email",
                "mobile_phone": "123",
            }))
            .await;
        response.assert_status_bad_request();

        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], ErrorResponse::BAD_REQUEST.name.as_ref());
        assert_eq!(body["resource"], "account");

        let fields: Vec<&str> = body["fields"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|f| f["field"].as_str())
            .collect();
        for field in ["first_name", "last_name", "email", "mobile_phone", "password"] {
            assert!(fields.contains(&field), "missing error for {field}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_weak_passwords() -> anyhow::Result<()> {
        let state = create_test_state_with_min_score(3).await?;
        let server = create_test_server_with_state(state)?;

        let mut body = registration("weak@example.com", "+1 123456789");
        body["password"] = json!("password");

        let response = server.post(USERS).json(&body).await;
        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["fields"][0]["field"], "password");
        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;
        register(&server, "john@example.com", "+1 123456789").await?;

        let response = server
            .post(USERS)
            .json(&registration("JOHN@example.com", "+1 987654321"))
            .await;
        response.assert_status_bad_request();

        let body: serde_json::Value = response.json();
        assert_eq!(body["fields"][0]["field"], "email");
        Ok(())
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;

        let response = server
            .post(USERS)
            .content_type("application/json")
            .text("{not json")
            .await;
        response.assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn owner_reads_self_but_not_others() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;
        let john = register(&server, "john@example.com", "+1 123456789").await?;
        let jane = register(&server, "jane@example.com", "+1 987654321").await?;
        let session = login(&server, "john@example.com").await?;

        let response = server
            .get(&format!("{USERS}{}", john.id))
            .add_header(AUTHORIZATION, bearer(&session)?)
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Account>(), john);

        server
            .get(&format!("{USERS}{}", jane.id))
            .add_header(AUTHORIZATION, bearer(&session)?)
            .await
            .assert_status(StatusCode::FORBIDDEN);
        Ok(())
    }

    #[tokio::test]
    async fn missing_token_is_distinct_from_forbidden() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;
        let john = register(&server, "john@example.com", "+1 123456789").await?;

        let response = server.get(&format!("{USERS}{}", john.id)).await;
        response.assert_status_unauthorized();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "missing_auth_token");

        let response = server
            .get(&format!("{USERS}{}", john.id))
            .add_header(AUTHORIZATION, "Bearer not.a.token")
            .await;
        response.assert_status_unauthorized();
        Ok(())
    }

    #[tokio::test]
    async fn invalid_path_is_bad_request() -> anyhow::Result<()> {
        let (server, state) = create_test_server().await?;
        let admin = admin_session(&server, &state).await?;

        server
            .get(&format!("{USERS}not-a-uuid"))
            .add_header(AUTHORIZATION, bearer(&admin)?)
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn list_is_admin_only() -> anyhow::Result<()> {
        let (server, state) = create_test_server().await?;
        register(&server, "john@example.com", "+1 123456789").await?;
        let john = login(&server, "john@example.com").await?;
        let admin = admin_session(&server, &state).await?;

        server
            .get(USERS)
            .add_header(AUTHORIZATION, bearer(&john)?)
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let response = server
            .get(USERS)
            .add_header(AUTHORIZATION, bearer(&admin)?)
            .await;
        response.assert_status_ok();
        let listed: Accounts = response.json();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|a| a.is_admin_user));
        Ok(())
    }

    #[tokio::test]
    async fn patch_changes_only_supplied_fields() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;
        let john = register(&server, "john@example.com", "+1 123456789").await?;
        let session = login(&server, "john@example.com").await?;

        let response = server
            .patch(&format!("{USERS}{}", john.id))
            .add_header(AUTHORIZATION, bearer(&session)?)
            .json(&json!({ "city": "sAN josé", "is_admin_user": true }))
            .await;
        response.assert_status_ok();

        let updated: Account = response.json();
        assert_eq!(updated.city, "San José");
        assert_eq!(updated.first_name, john.first_name);
        assert!(!updated.is_admin_user);
        Ok(())
    }

    #[tokio::test]
    async fn put_requires_every_field() -> anyhow::Result<()> {
        let (server, _) = create_test_server().await?;
        let john = register(&server, "john@example.com", "+1 123456789").await?;
        let session = login(&server, "john@example.com").await?;

        server
            .put(&format!("{USERS}{}", john.id))
            .add_header(AUTHORIZATION, bearer(&session)?)
            .json(&json!({ "city": "boston" }))
            .await
            .assert_status_bad_request();

        let mut body = registration("john@example.com", "+1 123456789");
        body["last_name"] = json!("smith");
        let response = server
            .put(&format!("{USERS}{}", john.id))
            .add_header(AUTHORIZATION, bearer(&session)?)
            .json(&body)
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Account>().last_name, "Smith");
        Ok(())
    }

    #[tokio::test]
    async fn deactivated_accounts_disappear() -> anyhow::Result<()> {
        let (server, state) = create_test_server().await?;
        let john = register(&server, "john@example.com", "+1 123456789").await?;
        let john_session = login(&server, "john@example.com").await?;
        let admin = admin_session(&server, &state).await?;

        server
            .delete(&format!("{USERS}{}", john.id))
            .add_header(AUTHORIZATION, bearer(&john_session)?)
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let response = server
            .delete(&format!("{USERS}{}", john.id))
            .add_header(AUTHORIZATION, bearer(&admin)?)
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Deactivated>().message,
            "The account was deactivated successfully"
        );

        server
            .get(&format!("{USERS}{}", john.id))
            .add_header(AUTHORIZATION, bearer(&admin)?)
            .await
            .assert_status_not_found();

        server
            .get(&format!("{USERS}{}", john.id))
            .add_header(AUTHORIZATION, bearer(&john_session)?)
            .await
            .assert_status_unauthorized();
        Ok(())
    }
}
