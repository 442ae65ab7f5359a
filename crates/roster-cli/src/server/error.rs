//! Server error types.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Error type for server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The server failed while running.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),

    /// In-flight requests did not finish within the shutdown timeout.
    #[error("Graceful shutdown did not complete within {0} seconds")]
    ShutdownTimeout(u64),
}

impl ServerError {
    /// Provides a human-readable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        let kind = match self {
            Self::Bind { source, .. } => source.kind(),
            Self::Runtime(err) => err.kind(),
            Self::ShutdownTimeout(_) => {
                return Some("Increase SHUTDOWN_TIMEOUT or the REQUEST_TIMEOUT bound");
            }
        };

        match kind {
            io::ErrorKind::PermissionDenied => {
                Some("Try using a port above 1024 or run with appropriate privileges")
            }
            io::ErrorKind::AddrInUse => Some(
                "The port is already in use. Try a different port or stop the conflicting service",
            ),
            io::ErrorKind::AddrNotAvailable => {
                Some("The address is not available. Check network interface configuration")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_errors_carry_suggestions() {
        let error = ServerError::Bind {
            address: "127.0.0.1:8000".to_owned(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };
        assert!(error.to_string().contains("127.0.0.1:8000"));
        assert!(error.suggestion().is_some_and(|s| s.contains("already in use")));

        let error = ServerError::Runtime(io::Error::other("boom"));
        assert_eq!(error.suggestion(), None);
    }
}
