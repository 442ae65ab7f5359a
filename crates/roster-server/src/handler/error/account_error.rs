//! Mapping of account service failures to HTTP errors.

use roster_core::{AuthorizationReason, Error as AccountError, FieldErrors};

use crate::handler::{Error, ErrorKind};
use crate::utility::tracing_targets::TRACING_TARGET_HANDLER;

impl From<AccountError> for Error<'static> {
    fn from(error: AccountError) -> Self {
        let error = match error {
            AccountError::Validation(fields) => ErrorKind::BadRequest
                .with_message("One or more fields are invalid")
                .with_fields(fields),
            AccountError::Duplicate { field } => {
                let mut fields = FieldErrors::new();
                let label = field.as_ref().replace('_', " ");
                fields.push(field, format!("An account with this {label} already exists"));

                ErrorKind::BadRequest
                    .with_message("One or more fields are invalid")
                    .with_fields(fields)
            }
            AccountError::NotFound { .. } => {
                ErrorKind::NotFound.with_message("Account not found")
            }
            AccountError::Authentication => ErrorKind::Unauthorized
                .with_message("No active account found with the given credentials"),
            AccountError::Authorization {
                reason: AuthorizationReason::Unauthenticated,
            } => ErrorKind::MissingAuthToken.with_context("Missing Authorization header"),
            AccountError::Authorization {
                reason: AuthorizationReason::Forbidden,
            } => ErrorKind::Forbidden
                .with_message("You do not have permission to perform this action"),
            error @ AccountError::Internal { .. } => {
                tracing::error!(
                    target: TRACING_TARGET_HANDLER,
                    error = %error,
                    source = ?std::error::Error::source(&error),
                    "account operation failed"
                );
                ErrorKind::InternalServerError.into_error()
            }
        };

        error.with_resource("account")
    }
}
