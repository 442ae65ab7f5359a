//! Credential services: password hashing, password strength evaluation,
//! JWT key management and token issuing.

mod jwt_issuer;
mod password_hasher;
mod password_strength;
mod session_keys;

pub use jwt_issuer::{JwtIssuer, TokenConfig};
pub use password_hasher::PasswordHasher;
pub use password_strength::{PasswordFeedback, PasswordStrength, PasswordStrengthResult};
pub use session_keys::{SessionKeys, SessionKeysConfig};
