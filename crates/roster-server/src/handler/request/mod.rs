//! Request types for HTTP handlers.

mod authentications;
mod paths;

pub use authentications::*;
pub use paths::*;

/// Registration and update body.
///
/// Every key is optional at the JSON level so that absent fields are reported
/// per field by the account service. Unknown keys are ignored.
pub type AccountBody = roster_core::account::AccountUpdate;
