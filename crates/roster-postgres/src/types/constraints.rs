//! Accounts table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Named constraints of the `accounts` table.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum AccountConstraints {
    // Unique indexes
    #[strum(serialize = "accounts_email_unique_idx")]
    EmailUnique,
    #[strum(serialize = "accounts_mobile_phone_unique_idx")]
    MobilePhoneUnique,

    // Check constraints
    #[strum(serialize = "accounts_password_hash_not_empty")]
    PasswordHashNotEmpty,
    #[strum(serialize = "accounts_updated_after_created")]
    UpdatedAfterCreated,
}

impl AccountConstraints {
    /// Creates a new [`AccountConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }
}

impl From<AccountConstraints> for String {
    #[inline]
    fn from(val: AccountConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for AccountConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn parses_index_names() {
        assert_eq!(
            AccountConstraints::new("accounts_email_unique_idx"),
            Some(AccountConstraints::EmailUnique)
        );
        assert_eq!(
            AccountConstraints::new("accounts_mobile_phone_unique_idx"),
            Some(AccountConstraints::MobilePhoneUnique)
        );
        assert_eq!(AccountConstraints::new("unknown_constraint"), None);
    }

    #[test]
    fn names_round_trip() {
        for constraint in AccountConstraints::iter() {
            assert_eq!(AccountConstraints::new(&constraint.to_string()), Some(constraint));
        }
    }
}
