//! Persistence seam for accounts.
//!
//! [`AccountStore`] is the only place accounts are owned. Implementations must
//! enforce uniqueness of email (case-insensitive) and mobile phone across all
//! rows, active or not, and must report a violation as [`Error::Duplicate`]
//! even when two writers race.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::TRACING_TARGET_STORE;
use crate::account::{Account, AccountChanges, NewAccount};
use crate::error::{Error, Field, Result};
use crate::health::StoreHealth;

/// Durable table of accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a new account and returns it with its assigned identifier.
    async fn insert(&self, account: NewAccount) -> Result<Account>;

    /// Finds an account by identifier, including inactive ones.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    /// Finds an account by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Lists active accounts, oldest first.
    async fn find_all_active(&self) -> Result<Vec<Account>>;

    /// Applies `changes` to an active account in a single atomic step.
    ///
    /// Fails with [`Error::NotFound`] if the account does not exist or is
    /// inactive.
    async fn update(&self, id: Uuid, changes: AccountChanges) -> Result<Account>;

    /// Returns `true` if another account already uses `email`.
    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> Result<bool>;

    /// Returns `true` if another account already uses `mobile_phone`.
    async fn mobile_phone_in_use(&self, mobile_phone: &str, exclude: Option<Uuid>)
    -> Result<bool>;

    /// Reports whether the store is reachable.
    async fn health(&self) -> StoreHealth {
        StoreHealth::healthy()
    }
}

/// In-memory [`AccountStore`] used by tests and local development.
///
/// Uniqueness checks and writes happen under one write lock, which gives the
/// same guarantee as a unique index.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored rows, active or not.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Returns `true` if no rows are stored.
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    fn conflict(
        accounts: &[Account],
        email: Option<&str>,
        mobile_phone: Option<&str>,
        exclude: Option<Uuid>,
    ) -> Option<Field> {
        let others = || accounts.iter().filter(|a| Some(a.id) != exclude);

        if let Some(email) = email.map(str::to_lowercase)
            && others().any(|a| a.email.to_lowercase() == email)
        {
            return Some(Field::Email);
        }

        if let Some(phone) = mobile_phone
            && others().any(|a| a.mobile_phone == phone)
        {
            return Some(Field::MobilePhone);
        }

        None
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert(&self, account: NewAccount) -> Result<Account> {
        let mut accounts = self.accounts.write().await;

        let conflict = Self::conflict(
            &accounts,
            Some(&account.email),
            Some(&account.mobile_phone),
            None,
        );
        if let Some(field) = conflict {
            tracing::debug!(
                target: TRACING_TARGET_STORE,
                field = %field,
                "insert rejected: unique constraint"
            );
            return Err(Error::Duplicate { field });
        }

        let now = Timestamp::now();
        let account = Account {
            id: Uuid::now_v7(),
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            country: account.country,
            city: account.city,
            address: account.address,
            mobile_phone: account.mobile_phone,
            username: account.username,
            password_hash: account.password_hash,
            is_active: true,
            is_admin: account.is_admin,
            is_superuser: account.is_superuser,
            created_at: now,
            updated_at: now,
        };

        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let email = email.to_lowercase();
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| a.email.to_lowercase() == email)
            .cloned())
    }

    async fn find_all_active(&self) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().filter(|a| a.is_active).cloned().collect())
    }

    async fn update(&self, id: Uuid, changes: AccountChanges) -> Result<Account> {
        let mut accounts = self.accounts.write().await;

        let conflict = Self::conflict(
            &accounts,
            changes.email.as_deref(),
            changes.mobile_phone.as_deref(),
            Some(id),
        );
        if let Some(field) = conflict {
            return Err(Error::Duplicate { field });
        }

        let account = accounts
            .iter_mut()
            .find(|a| a.id == id && a.is_active)
            .ok_or(Error::NotFound { id })?;

        changes.apply(account);
        account.updated_at = Timestamp::now();
        Ok(account.clone())
    }

    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> Result<bool> {
        let accounts = self.accounts.read().await;
        Ok(Self::conflict(&accounts, Some(email), None, exclude).is_some())
    }

    async fn mobile_phone_in_use(
        &self,
        mobile_phone: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool> {
        let accounts = self.accounts.read().await;
        Ok(Self::conflict(&accounts, None, Some(mobile_phone), exclude).is_some())
    }

    async fn health(&self) -> StoreHealth {
        let start = Instant::now();
        let rows = self.len().await;
        StoreHealth::healthy()
            .with_latency(start.elapsed())
            .with_detail(format!("in-memory store with {rows} rows"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(email: &str, phone: &str) -> NewAccount {
        NewAccount {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: email.into(),
            country: "Usa".into(),
            city: "Boston".into(),
            address: "1 Main St".into(),
            mobile_phone: phone.into(),
            username: "John".into(),
            password_hash: "hash".into(),
            is_admin: false,
            is_superuser: false,
        }
    }

    #[tokio::test]
    async fn insert_assigns_identity() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let account = store.insert(new_account("a@example.com", "+1 12345678")).await?;

        assert!(account.is_active);
        let found = store.find_by_id(account.id).await?;
        assert_eq!(found, Some(account));
        Ok(())
    }

    #[tokio::test]
    async fn email_is_unique_ignoring_case() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store.insert(new_account("a@example.com", "+1 12345678")).await?;

        let result = store.insert(new_account("A@Example.com", "+1 87654321")).await;
        assert!(matches!(result, Err(Error::Duplicate { field: Field::Email })));

        let result = store.insert(new_account("b@example.com", "+1 12345678")).await;
        assert!(matches!(
            result,
            Err(Error::Duplicate {
                field: Field::MobilePhone
            })
        ));

        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn email_case_folding_covers_non_ascii() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let account = store.insert(new_account("josé@éxample.com", "+34 612345678")).await?;

        assert!(store.email_in_use("JOSÉ@ÉXAMPLE.COM", None).await?);
        let found = store.find_by_email("José@Éxample.com").await?;
        assert_eq!(found.map(|a| a.id), Some(account.id));

        let result = store.insert(new_account("JOSÉ@éxample.com", "+34 612345679")).await;
        assert!(matches!(result, Err(Error::Duplicate { field: Field::Email })));
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_inserts_admit_one() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(new_account("same@example.com", &format!("+1 1234567{i}")))
                        .await
                })
            })
            .collect();

        let mut succeeded = 0;
        for task in tasks {
            match task.await? {
                Ok(_) => succeeded += 1,
                Err(Error::Duplicate { field }) => assert_eq!(field, Field::Email),
                Err(other) => return Err(other.into()),
            }
        }

        assert_eq!(succeeded, 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_skips_inactive_rows() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let account = store.insert(new_account("a@example.com", "+1 12345678")).await?;

        let updated = store.update(account.id, AccountChanges::deactivate()).await?;
        assert!(!updated.is_active);

        let result = store.update(account.id, AccountChanges::deactivate()).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        assert!(store.find_all_active().await?.is_empty());
        assert!(store.find_by_id(account.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn uniqueness_excludes_own_row() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let account = store.insert(new_account("a@example.com", "+1 12345678")).await?;

        assert!(!store.email_in_use("a@example.com", Some(account.id)).await?);
        assert!(store.email_in_use("A@EXAMPLE.COM", None).await?);
        assert!(store.mobile_phone_in_use("+1 12345678", None).await?);

        let changes = AccountChanges {
            email: Some("a@example.com".into()),
            ..Default::default()
        };
        assert!(store.update(account.id, changes).await.is_ok());
        Ok(())
    }
}
