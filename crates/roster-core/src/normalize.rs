//! Normalization applied before accounts are persisted.

use crate::validate::InvalidFormat;

/// Converts every whitespace-separated word to title case and joins them
/// with single spaces.
///
/// Empty or whitespace-only input is rejected.
pub fn normalize_title_case(text: &str) -> Result<String, InvalidFormat> {
    let words: Vec<String> = text.split_whitespace().map(title_case_word).collect();
    if words.is_empty() {
        return Err(InvalidFormat::new("cannot normalize an empty name"));
    }

    Ok(words.join(" "))
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Trims the address and lowercases its domain part.
///
/// The local part is kept as given.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_multi_word() {
        assert_eq!(normalize_title_case("jOHN dOE").unwrap(), "John Doe");
        assert_eq!(normalize_title_case("  new   york ").unwrap(), "New York");
    }

    #[test]
    fn title_case_single_word() {
        assert_eq!(normalize_title_case("madrid").unwrap(), "Madrid");
        assert_eq!(normalize_title_case("ÁLVAREZ").unwrap(), "Álvarez");
        assert_eq!(normalize_title_case("ñu").unwrap(), "Ñu");
    }

    #[test]
    fn title_case_rejects_empty() {
        assert!(normalize_title_case("").is_err());
        assert!(normalize_title_case(" \t ").is_err());
    }

    #[test]
    fn email_domain_is_lowercased() {
        assert_eq!(normalize_email(" John@Example.COM "), "John@example.com");
        assert_eq!(normalize_email("plain"), "plain");
    }
}
