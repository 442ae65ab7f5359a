//! Error taxonomy for account operations.

use std::fmt;

use derive_more::{Deref, IntoIterator};
use serde::Serialize;
use strum::{AsRefStr, Display, IntoStaticStr};
use thiserror::Error;
use uuid::Uuid;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Used as the source of [`Error::Internal`] so that store, hasher and
/// token issuer failures keep their original cause.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Account field an error can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Display, AsRefStr, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Country,
    City,
    Address,
    MobilePhone,
    Password,
}

/// A single violated field and its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every field violation found while validating one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deref, IntoIterator)]
pub struct FieldErrors(#[into_iterator(owned, ref)] Vec<FieldError>);

impl FieldErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation for `field`.
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    /// Returns `true` if a violation was already recorded for `field`.
    pub fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Fails with [`Error::Validation`] when at least one violation was recorded.
    pub fn into_result(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// Why an authorization check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AuthorizationReason {
    /// No identity was presented.
    Unauthenticated,
    /// An identity was presented but lacks the permission.
    Forbidden,
}

/// Categories of errors, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Duplicate,
    NotFound,
    Authentication,
    Authorization,
    Internal,
}

/// Errors returned by [`AccountService`] operations.
///
/// [`AccountService`]: crate::AccountService
#[derive(Debug, Error)]
pub enum Error {
    /// One or more fields failed validation.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The email or mobile phone is already used by another account.
    #[error("{field} is already in use")]
    Duplicate { field: Field },

    /// No active account has this identifier.
    #[error("account {id} not found")]
    NotFound { id: Uuid },

    /// Credentials did not match. The cause is intentionally not recorded.
    #[error("invalid credentials")]
    Authentication,

    /// The requester may not perform the operation.
    #[error("authorization denied: {reason}")]
    Authorization { reason: AuthorizationReason },

    /// A collaborator failed.
    #[error("{service}: {message}")]
    Internal {
        service: &'static str,
        message: String,
        #[source]
        source: Option<BoxedError>,
    },
}

impl Error {
    /// Creates an authorization error for a missing identity.
    pub fn unauthenticated() -> Self {
        Self::Authorization {
            reason: AuthorizationReason::Unauthenticated,
        }
    }

    /// Creates an authorization error for an insufficient identity.
    pub fn forbidden() -> Self {
        Self::Authorization {
            reason: AuthorizationReason::Forbidden,
        }
    }

    /// Creates an internal error raised by `service`.
    pub fn internal(service: &'static str, message: impl Into<String>) -> Self {
        Self::Internal {
            service,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches a source to an internal error. Other variants are returned unchanged.
    pub fn with_source(self, error: impl std::error::Error + Send + Sync + 'static) -> Self {
        match self {
            Self::Internal {
                service, message, ..
            } => Self::Internal {
                service,
                message,
                source: Some(Box::new(error)),
            },
            other => other,
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Duplicate { .. } => ErrorKind::Duplicate,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Authentication => ErrorKind::Authentication,
            Self::Authorization { .. } => ErrorKind::Authorization,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}
