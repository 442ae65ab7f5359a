//! Drop-in replacements for axum extractors whose rejections are rendered
//! as [`handler::Error`] bodies.
//!
//! [`handler::Error`]: crate::handler::Error

pub mod enhanced_json;
pub mod enhanced_path;
pub mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_path::Path;
pub use self::validated_json::ValidateJson;

/// Keeps rejection details short enough to return to clients.
pub(crate) fn sanitize_error_message(message: &str) -> String {
    let lines = message.lines().take(3).collect::<Vec<_>>();
    lines.join(" ").chars().take(200).collect()
}
