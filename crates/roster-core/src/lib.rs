#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for authorization decisions.
pub const TRACING_TARGET_AUTHORIZATION: &str = "roster_core::authorization";

/// Tracing target for account service operations.
pub const TRACING_TARGET_SERVICE: &str = "roster_core::service";

/// Tracing target for the in-memory store.
pub const TRACING_TARGET_STORE: &str = "roster_core::store";

mod error;
mod health;

pub mod account;
pub mod authz;
pub mod normalize;
pub mod security;
pub mod service;
pub mod store;
pub mod validate;

pub use account::{Account, PublicAccount};
pub use authz::{AuthProvider, AuthResult, Requester};
pub use error::{
    AuthorizationReason, BoxedError, Error, ErrorKind, Field, FieldError, FieldErrors, Result,
};
pub use health::{StoreHealth, StoreStatus};
pub use service::{AccountService, Session, UpdateMode};
pub use store::{AccountStore, MemoryStore};
