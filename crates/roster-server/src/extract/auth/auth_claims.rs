//! JWT claims carried by access and refresh tokens.

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use roster_core::Account;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};

/// Purpose of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TokenKind {
    /// Authorizes API requests.
    Access,
    /// Only exchanged for a new token pair.
    Refresh,
}

/// JWT claims for authentication tokens.
///
/// | Claim | Field | Description |
/// |-------|-------|-------------|
/// | `iss` | `issued_by` | Token issuer identifier |
/// | `aud` | `audience` | Token audience identifier |
/// | `jti` | `token_id` | Unique token identifier |
/// | `sub` | `account_id` | Account this token represents |
/// | `iat` | `issued_at` | Creation time, in seconds |
/// | `exp` | `expires_at` | Expiration time, in seconds |
/// | `cre` | `is_administrator` | Admin flag at issue time |
/// | `token_type` | `token_kind` | [`TokenKind`] |
///
/// Tokens are signed with EdDSA (Ed25519).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthClaims {
    #[serde(rename = "iss")]
    issued_by: String,
    #[serde(rename = "aud")]
    audience: String,

    /// Unique token identifier.
    #[serde(rename = "jti")]
    pub token_id: Uuid,
    /// Account this token represents.
    #[serde(rename = "sub")]
    pub account_id: Uuid,

    /// Issued at.
    #[serde(rename = "iat", with = "jiff::fmt::serde::timestamp::second::required")]
    pub issued_at: Timestamp,
    /// Expires at.
    #[serde(rename = "exp", with = "jiff::fmt::serde::timestamp::second::required")]
    pub expires_at: Timestamp,

    /// Administrator flag at issue time.
    #[serde(rename = "cre")]
    pub is_administrator: bool,
    /// Whether this is an access or refresh token.
    #[serde(rename = "token_type")]
    pub token_kind: TokenKind,
}

impl AuthClaims {
    /// JWT audience identifier.
    const JWT_AUDIENCE: &str = "roster:server";
    /// JWT issuer identifier.
    const JWT_ISSUER: &str = "roster";

    /// Creates claims for `account` that expire after `ttl`.
    pub fn new(
        account: &Account,
        token_kind: TokenKind,
        ttl: SignedDuration,
    ) -> roster_core::Result<Self> {
        let issued_at = Timestamp::now();
        let expires_at = issued_at.checked_add(ttl).map_err(|e| {
            roster_core::Error::internal("jwt", "token lifetime out of range").with_source(e)
        })?;

        Ok(Self {
            issued_by: Self::JWT_ISSUER.to_owned(),
            audience: Self::JWT_AUDIENCE.to_owned(),
            token_id: Uuid::new_v4(),
            account_id: account.id,
            issued_at,
            expires_at,
            is_administrator: account.is_admin,
            token_kind,
        })
    }

    /// Returns `true` if the expiration time has passed.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now()
    }

    /// Returns the remaining lifetime, or zero if already expired.
    #[must_use]
    pub fn remaining_lifetime(&self) -> SignedDuration {
        let remaining = self.expires_at.duration_since(Timestamp::now());
        if remaining.is_positive() {
            remaining
        } else {
            SignedDuration::ZERO
        }
    }

    /// Signs the claims into a compact JWT.
    pub fn encode(&self, encoding_key: &EncodingKey) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::EdDSA), self, encoding_key)
    }

    /// Verifies `token` and returns its claims.
    ///
    /// Fails unless the signature, issuer, audience and expiry are valid and
    /// the token is of the `expected` kind.
    pub fn decode(token: &str, decoding_key: &DecodingKey, expected: TokenKind) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.validate_aud = true;
        validation.set_audience(&[Self::JWT_AUDIENCE]);
        validation.set_issuer(&[Self::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "sub", "exp"]);

        let claims = decode::<Self>(token, decoding_key, &validation)?.claims;

        if claims.is_expired() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                token_id = %claims.token_id,
                account_id = %claims.account_id,
                expired_at = %claims.expires_at,
                "token validation failed: token expired"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Token is invalid or expired")
                .with_resource("authentication"));
        }

        if claims.token_kind != expected {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                token_id = %claims.token_id,
                account_id = %claims.account_id,
                expected = %expected,
                actual = %claims.token_kind,
                "token validation failed: wrong token type"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Token has wrong type")
                .with_resource("authentication"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            token_id = %claims.token_id,
            account_id = %claims.account_id,
            token_kind = %claims.token_kind,
            remaining = ?claims.remaining_lifetime(),
            "token validated"
        );

        Ok(claims)
    }
}

impl From<JwtError> for Error<'static> {
    fn from(error: JwtError) -> Self {
        let error = match error.kind() {
            JwtErrorKind::ExpiredSignature => ErrorKind::Unauthorized
                .with_message("Token is invalid or expired")
                .with_context("Please sign in again to continue"),
            JwtErrorKind::InvalidToken => ErrorKind::MalformedAuthToken
                .with_message("Authentication token is invalid")
                .with_context("The provided token format is unrecognized"),
            JwtErrorKind::InvalidSignature => ErrorKind::Unauthorized
                .with_message("Authentication token verification failed")
                .with_context("Token signature could not be verified"),
            JwtErrorKind::InvalidAlgorithm => ErrorKind::MalformedAuthToken
                .with_message("Authentication token uses unsupported format")
                .with_context("Token was signed with an incompatible algorithm"),
            JwtErrorKind::InvalidAudience => ErrorKind::Unauthorized
                .with_message("Authentication token is not valid for this service")
                .with_context("Token was issued for a different application"),
            JwtErrorKind::InvalidIssuer => ErrorKind::Unauthorized
                .with_message("Authentication token is from an untrusted source")
                .with_context("Token was not issued by this authentication system"),
            JwtErrorKind::MissingRequiredClaim(claim) => ErrorKind::MalformedAuthToken
                .with_message("Authentication token is incomplete")
                .with_context(format!("Token is missing required field: {}", claim)),
            JwtErrorKind::Base64(_) | JwtErrorKind::Json(_) => {
                ErrorKind::MalformedAuthToken
                    .with_message("Authentication token structure is invalid")
                    .with_context("Token payload contains malformed data")
            }
            _ => ErrorKind::InternalServerError
                .with_message("Authentication processing failed")
                .with_context("An unexpected error occurred during token validation"),
        };

        error.with_resource("authentication")
    }
}
