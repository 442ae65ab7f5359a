//! Account record and the data shapes that flow in and out of the service.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub mobile_phone: String,
    /// Display name, always the normalized first name.
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
    /// The only flag consulted by authorization.
    pub is_admin: bool,
    pub is_superuser: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    /// Returns `true` if this account is an administrator.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Returns the public projection of this account.
    pub fn to_public(&self) -> PublicAccount {
        PublicAccount::from(self)
    }
}

/// A validated, normalized account ready to be inserted.
///
/// The store assigns the identifier and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub mobile_phone: String,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_superuser: bool,
}

/// A validated patch applied to an active account.
///
/// `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub mobile_phone: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
}

impl AccountChanges {
    /// Returns a patch that soft-deletes the account.
    pub fn deactivate() -> Self {
        Self {
            is_active: Some(false),
            ..Default::default()
        }
    }

    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies this patch to `account` in place.
    pub fn apply(self, account: &mut Account) {
        let Self {
            first_name,
            last_name,
            email,
            country,
            city,
            address,
            mobile_phone,
            username,
            password_hash,
            is_active,
        } = self;

        replace(&mut account.first_name, first_name);
        replace(&mut account.last_name, last_name);
        replace(&mut account.email, email);
        replace(&mut account.country, country);
        replace(&mut account.city, city);
        replace(&mut account.address, address);
        replace(&mut account.mobile_phone, mobile_phone);
        replace(&mut account.username, username);
        replace(&mut account.password_hash, password_hash);
        replace(&mut account.is_active, is_active);
    }
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Registration input. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub mobile_phone: String,
    pub password: String,
}

/// Update input.
///
/// For a partial update only present fields change; a full update requires
/// every field. Unknown keys such as `id` or `is_admin_user` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub mobile_phone: Option<String>,
    pub password: Option<String>,
}

impl From<RegisterAccount> for AccountUpdate {
    fn from(value: RegisterAccount) -> Self {
        Self {
            first_name: Some(value.first_name),
            last_name: Some(value.last_name),
            email: Some(value.email),
            country: Some(value.country),
            city: Some(value.city),
            address: Some(value.address),
            mobile_phone: Some(value.mobile_phone),
            password: Some(value.password),
        }
    }
}

/// Account fields safe to return to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAccount {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub mobile_phone: String,
    pub is_admin_user: bool,
}

impl From<&Account> for PublicAccount {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            country: account.country.clone(),
            city: account.city.clone(),
            address: account.address.clone(),
            mobile_phone: account.mobile_phone.clone(),
            is_admin_user: account.is_admin,
        }
    }
}

impl From<Account> for PublicAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            country: account.country,
            city: account.city,
            address: account.address,
            mobile_phone: account.mobile_phone,
            is_admin_user: account.is_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        let now = Timestamp::now();
        Account {
            id: Uuid::now_v7(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "johndoe@example.com".into(),
            country: "Usa".into(),
            city: "New York".into(),
            address: "123 Main St".into(),
            mobile_phone: "+1 123456789".into(),
            username: "John".into(),
            password_hash: "hash".into(),
            is_active: true,
            is_admin: false,
            is_superuser: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn public_projection_omits_secrets() -> anyhow::Result<()> {
        let account = account();
        let value = serde_json::to_value(account.to_public())?;

        assert_eq!(value["is_admin_user"], false);
        assert_eq!(value["email"], "johndoe@example.com");
        assert!(value.get("password").is_none());
        assert!(value.get("password_hash").is_none());
        assert!(value.get("username").is_none());
        Ok(())
    }

    #[test]
    fn changes_apply_only_present_fields() {
        let mut account = account();
        let changes = AccountChanges {
            city: Some("Boston".into()),
            ..Default::default()
        };
        assert!(!changes.is_empty());

        changes.apply(&mut account);
        assert_eq!(account.city, "Boston");
        assert_eq!(account.first_name, "John");
        assert!(account.is_active);

        AccountChanges::deactivate().apply(&mut account);
        assert!(!account.is_active);
    }

    #[test]
    fn update_ignores_read_only_keys() -> anyhow::Result<()> {
        let update: AccountUpdate = serde_json::from_value(serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "is_admin_user": true,
            "city": "Paris",
        }))?;

        assert_eq!(update.city.as_deref(), Some("Paris"));
        assert!(update.first_name.is_none());
        Ok(())
    }
}
