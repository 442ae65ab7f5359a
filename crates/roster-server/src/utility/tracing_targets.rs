//! Tracing target constants for structured logging.
//!
//! Targets allow per-area filtering through `RUST_LOG`, for example
//! `RUST_LOG=roster_server::authentication=debug`.

/// Token validation and JWT processing.
pub const TRACING_TARGET_AUTHENTICATION: &str = "roster_server::authentication";

/// Requester resolution and access decisions.
pub const TRACING_TARGET_AUTHORIZATION: &str = "roster_server::authorization";

/// Account handlers.
pub const TRACING_TARGET_HANDLER: &str = "roster_server::handler";

/// Error recovery including middleware errors and request failures.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "roster_server::recovery::error";

/// Panic recovery including handler panics.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "roster_server::recovery::panic";

/// Password strength evaluation.
pub const TRACING_TARGET_PASSWORD_STRENGTH: &str = "roster_server::password_strength";

/// Password hashing and verification.
pub const TRACING_TARGET_PASSWORD_HASHER: &str = "roster_server::password_hasher";

/// Session key loading and JWT signing.
pub const TRACING_TARGET_SESSION_KEYS: &str = "roster_server::session_keys";

/// Application state construction.
pub const TRACING_TARGET_SERVICE: &str = "roster_server::service";
