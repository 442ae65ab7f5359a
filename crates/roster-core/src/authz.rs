//! Owner-or-admin authorization rule.
//!
//! Reads and updates are granted to the account owner and to administrators.
//! Listing and deactivation are granted to administrators only. A missing
//! requester is always rejected as unauthenticated, which callers must keep
//! distinguishable from a forbidden requester.

use std::borrow::Cow;

use uuid::Uuid;

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::error::{Error, Result};

/// The authenticated identity behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub account_id: Uuid,
    pub is_admin: bool,
}

impl Requester {
    /// Creates a new requester.
    pub fn new(account_id: Uuid, is_admin: bool) -> Self {
        Self {
            account_id,
            is_admin,
        }
    }
}

/// Result of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub granted: bool,
    pub reason: Option<Cow<'static, str>>,
}

impl AuthResult {
    /// Creates a granted authorization result.
    pub const fn granted() -> Self {
        Self {
            granted: true,
            reason: None,
        }
    }

    /// Creates a denied authorization result with a reason.
    pub fn denied(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            granted: false,
            reason: Some(reason.into()),
        }
    }

    /// Converts the result into a `Result`, failing with a forbidden error
    /// if access was denied.
    pub fn into_result(self) -> Result<()> {
        if self.granted {
            Ok(())
        } else {
            Err(Error::forbidden())
        }
    }
}

/// Authorization checks for an authenticated identity.
pub trait AuthProvider {
    /// Returns the account ID of the authenticated user.
    fn account_id(&self) -> Uuid;

    /// Returns whether the user is an administrator.
    fn is_admin(&self) -> bool;

    /// Grants access to the requester's own account, or to any account for
    /// administrators.
    fn check_self_permission(&self, target_account_id: Uuid) -> AuthResult {
        let is_self_access = self.account_id() == target_account_id;
        let is_admin = self.is_admin();

        if is_self_access || is_admin {
            tracing::debug!(
                target: TRACING_TARGET_AUTHORIZATION,
                account_id = %self.account_id(),
                target_account_id = %target_account_id,
                access_type = if is_self_access { "self" } else { "admin" },
                "self-permission granted"
            );

            AuthResult::granted()
        } else {
            tracing::warn!(
                target: TRACING_TARGET_AUTHORIZATION,
                account_id = %self.account_id(),
                target_account_id = %target_account_id,
                "self-permission denied: insufficient privileges"
            );

            AuthResult::denied("Can only access your own account")
        }
    }

    /// Grants access to administrators only.
    fn check_admin_permission(&self) -> AuthResult {
        if self.is_admin() {
            tracing::debug!(
                target: TRACING_TARGET_AUTHORIZATION,
                account_id = %self.account_id(),
                "admin permission granted"
            );

            AuthResult::granted()
        } else {
            tracing::warn!(
                target: TRACING_TARGET_AUTHORIZATION,
                account_id = %self.account_id(),
                "admin permission denied"
            );

            AuthResult::denied("Administrator privileges required")
        }
    }
}

impl AuthProvider for Requester {
    #[inline]
    fn account_id(&self) -> Uuid {
        self.account_id
    }

    #[inline]
    fn is_admin(&self) -> bool {
        self.is_admin
    }
}

/// Requires an authenticated owner of `target_account_id` or an administrator.
pub fn authorize_self<A: AuthProvider>(requester: Option<&A>, target_account_id: Uuid) -> Result<()> {
    let requester = authenticated(requester)?;
    requester.check_self_permission(target_account_id).into_result()
}

/// Requires an authenticated administrator.
pub fn authorize_admin<A: AuthProvider>(requester: Option<&A>) -> Result<()> {
    let requester = authenticated(requester)?;
    requester.check_admin_permission().into_result()
}

fn authenticated<A: AuthProvider>(requester: Option<&A>) -> Result<&A> {
    requester.ok_or_else(|| {
        tracing::debug!(
            target: TRACING_TARGET_AUTHORIZATION,
            "access denied: unauthenticated"
        );
        Error::unauthenticated()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthorizationReason;

    fn reason(result: Result<()>) -> Option<AuthorizationReason> {
        match result {
            Err(Error::Authorization { reason }) => Some(reason),
            _ => None,
        }
    }

    #[test]
    fn owner_reads_self() {
        let owner = Requester::new(Uuid::now_v7(), false);
        assert!(authorize_self(Some(&owner), owner.account_id).is_ok());
    }

    #[test]
    fn owner_cannot_read_others() {
        let owner = Requester::new(Uuid::now_v7(), false);
        let result = authorize_self(Some(&owner), Uuid::now_v7());
        assert_eq!(reason(result), Some(AuthorizationReason::Forbidden));
    }

    #[test]
    fn admin_reads_anyone() {
        let admin = Requester::new(Uuid::now_v7(), true);
        assert!(authorize_self(Some(&admin), Uuid::now_v7()).is_ok());
        assert!(authorize_admin(Some(&admin)).is_ok());
    }

    #[test]
    fn non_admin_cannot_administer() {
        let owner = Requester::new(Uuid::now_v7(), false);
        let result = authorize_admin(Some(&owner));
        assert_eq!(reason(result), Some(AuthorizationReason::Forbidden));
    }

    #[test]
    fn missing_requester_is_unauthenticated() {
        let result = authorize_self::<Requester>(None, Uuid::now_v7());
        assert_eq!(reason(result), Some(AuthorizationReason::Unauthenticated));

        let result = authorize_admin::<Requester>(None);
        assert_eq!(reason(result), Some(AuthorizationReason::Unauthenticated));
    }
}
