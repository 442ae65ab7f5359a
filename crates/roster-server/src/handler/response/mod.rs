//! Response types for HTTP handlers.

mod accounts;
mod error_response;
mod monitors;

pub use accounts::*;
pub use error_response::ErrorResponse;
pub use monitors::*;
