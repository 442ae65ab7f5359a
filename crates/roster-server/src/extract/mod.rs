//! Request extractors with uniform error responses.
//!
//! # Authentication
//!
//! - [`AuthHeader`] - bearer token extraction and validation
//! - [`AuthClaims`] - JWT claims issued by this server
//! - [`AuthState`] - requester resolved against the account store
//!
//! # Request data
//!
//! - [`Json`] - JSON body with descriptive rejections
//! - [`ValidateJson`] - JSON body validated with `validator`
//! - [`Path`] - path parameters with descriptive rejections

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthClaims, AuthHeader, AuthState, TokenKind};
pub use crate::extract::reject::{Json, Path, ValidateJson};
