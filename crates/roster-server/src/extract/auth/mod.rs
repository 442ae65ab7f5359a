//! Bearer token authentication.
//!
//! - [`AuthClaims`] - JWT claims issued by [`JwtIssuer`]
//! - [`AuthHeader`] - validated access token from the `Authorization` header
//! - [`AuthState`] - requester resolved against the active account
//!
//! [`JwtIssuer`]: crate::service::JwtIssuer

mod auth_claims;
mod auth_header;
mod auth_state;

pub use self::auth_claims::{AuthClaims, TokenKind};
pub use self::auth_header::AuthHeader;
pub use self::auth_state::AuthState;
