//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use roster_core::MemoryStore;
//! use roster_server::handler::routes;
//! use roster_server::service::{ServiceState, SessionKeys, TokenConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let keys = SessionKeys::new("public.pem", "private.pem").await?;
//! let state = ServiceState::with_store(
//!     Arc::new(MemoryStore::new()),
//!     keys,
//!     TokenConfig::default(),
//!     3,
//! );
//!
//! let router: axum::Router = routes().with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod accounts;
mod authentications;
mod error;
mod monitors;
pub mod request;
pub mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Prefix every API route is nested under.
pub const API_PREFIX: &str = "/api/v1";

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with every API route nested under [`API_PREFIX`].
///
/// Unknown paths answer with a JSON 404.
pub fn routes() -> Router<ServiceState> {
    let api = Router::new()
        .merge(accounts::routes())
        .merge(authentications::routes())
        .merge(monitors::routes());

    Router::new().nest(API_PREFIX, api).fallback(fallback)
}
