//! Field validators.
//!
//! Each validator is a pure predicate that either accepts the input or
//! returns an [`InvalidFormat`] carrying a message suitable for the caller.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use validator::ValidateEmail;

/// Maximum length of first name, last name, country and city.
pub const NAME_MAX_LENGTH: usize = 50;

/// Maximum length of the postal address.
pub const ADDRESS_MAX_LENGTH: usize = 255;

/// Maximum length of an email address.
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum length of a password accepted for hashing.
pub const PASSWORD_MAX_LENGTH: usize = 128;

static NAME_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z ÁÉÍÓÚáéíóúÑñ]").expect("Invalid regex"));

static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\d{1,3} \d{8,15}$").expect("Invalid regex"));

static PHONE_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9 +]").expect("Invalid regex"));

/// Input did not satisfy a format rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidFormat {
    message: String,
}

impl InvalidFormat {
    /// Creates a new format error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<InvalidFormat> for String {
    fn from(value: InvalidFormat) -> Self {
        value.message
    }
}

/// Accepts names made of ASCII letters, spaces and Spanish accented letters.
///
/// Applies to first name, last name, country and city.
pub fn validate_name(text: &str) -> Result<(), InvalidFormat> {
    if NAME_DISALLOWED.is_match(text) {
        return Err(InvalidFormat::new(format!(
            "{text}: names, surnames, cities and countries may only contain letters"
        )));
    }

    Ok(())
}

/// Accepts phone numbers of the form `+<1-3 digits> <8-15 digits>`.
///
/// The shape check runs first, then the character set check; each produces
/// its own message.
pub fn validate_phone(text: &str) -> Result<(), InvalidFormat> {
    if !PHONE_SHAPE.is_match(text) {
        return Err(InvalidFormat::new(format!(
            "mobile phone numbers must have the format +123 4567890000, got {text}"
        )));
    }

    if PHONE_DISALLOWED.is_match(text) {
        return Err(InvalidFormat::new(format!(
            "mobile phone numbers may only contain digits 0-9, spaces and +, got {text}"
        )));
    }

    Ok(())
}

/// Accepts syntactically valid email addresses.
pub fn validate_email(text: &str) -> Result<(), InvalidFormat> {
    if text.len() > EMAIL_MAX_LENGTH || !text.validate_email() {
        return Err(InvalidFormat::new(format!("{text} is not a valid email address")));
    }

    Ok(())
}

/// Rejects empty values and values longer than `max` characters.
pub fn validate_length(text: &str, max: usize) -> Result<(), InvalidFormat> {
    if text.trim().is_empty() {
        return Err(InvalidFormat::new("this field is required"));
    }

    if text.chars().count() > max {
        return Err(InvalidFormat::new(format!(
            "ensure this field has no more than {max} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_accept_letters_and_accents() {
        for name in ["John", "López Pérez", "España", "Cádiz", "New York", "ÑANDÚ"] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn names_reject_digits_and_symbols() {
        for name in ["John1", "O'Brien", "Jean-Luc", "a.b", "x_y", "Zoë", "email@x"] {
            let error = validate_name(name).unwrap_err();
            assert!(error.message().contains(name));
        }
    }

    #[test]
    fn phones_accept_expected_shape() {
        for phone in ["+1 123456789", "+34 10101023", "+123 123456789012345"] {
            assert!(validate_phone(phone).is_ok(), "{phone} should be valid");
        }
    }

    #[test]
    fn phones_reject_bad_shape() {
        for phone in [
            "1 123456789",
            "+1 1234567",
            "+1234 12345678",
            "+1 1234567890123456",
            "+1  123456789",
            "+1123456789",
            "+1 12345678x",
            "",
        ] {
            let error = validate_phone(phone).unwrap_err();
            assert!(error.message().contains("format"), "{phone}");
            assert!(error.message().contains(phone));
        }
    }

    #[test]
    fn non_ascii_digits_fail_the_charset_check() {
        let phone = "+1 \u{0661}\u{0662}\u{0663}\u{0664}\u{0665}\u{0666}\u{0667}\u{0668}";
        let charset = validate_phone(phone).unwrap_err();
        assert!(charset.message().contains("may only contain"));
        assert!(charset.message().contains(phone));

        let shape = validate_phone("12").unwrap_err();
        assert!(shape.message().contains("format"));
        assert_ne!(shape.message(), charset.message());
    }

    #[test]
    fn emails() {
        assert!(validate_email("johndoe@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn lengths() {
        assert!(validate_length("Madrid", NAME_MAX_LENGTH).is_ok());
        assert!(validate_length("   ", NAME_MAX_LENGTH).is_err());
        assert!(validate_length(&"a".repeat(51), NAME_MAX_LENGTH).is_err());
        assert!(validate_length(&"ñ".repeat(50), NAME_MAX_LENGTH).is_ok());
    }
}
