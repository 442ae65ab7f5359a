//! [`AccountStore`] backed by PostgreSQL.

use async_trait::async_trait;
use roster_core::account::{Account, AccountChanges, NewAccount};
use roster_core::store::AccountStore;
use roster_core::{Error, Field, Result, StoreHealth};
use uuid::Uuid;

use crate::query::AccountRepository;
use crate::types::AccountConstraints;
use crate::{PgClient, PgError, TRACING_TARGET_QUERY, model};

impl From<PgError> for Error {
    fn from(error: PgError) -> Self {
        match error.constraint_violation() {
            Some(AccountConstraints::EmailUnique) => Error::Duplicate {
                field: Field::Email,
            },
            Some(AccountConstraints::MobilePhoneUnique) => Error::Duplicate {
                field: Field::MobilePhone,
            },
            _ => {
                tracing::error!(
                    target: TRACING_TARGET_QUERY,
                    error = %error,
                    transient = error.is_transient(),
                    "database operation failed"
                );
                Error::internal("postgres", "database operation failed").with_source(error)
            }
        }
    }
}

impl From<model::Account> for Account {
    fn from(row: model::Account) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            country: row.country,
            city: row.city,
            address: row.address,
            mobile_phone: row.mobile_phone,
            username: row.username,
            password_hash: row.password_hash,
            is_active: row.is_active,
            is_admin: row.is_admin,
            is_superuser: row.is_superuser,
            created_at: row.created_at.into(),
            updated_at: row.updated_at.into(),
        }
    }
}

impl From<NewAccount> for model::NewAccount {
    fn from(account: NewAccount) -> Self {
        Self {
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
            is_admin: account.is_admin,
            is_superuser: account.is_superuser,
        }
    }
}

impl From<AccountChanges> for model::UpdateAccount {
    fn from(changes: AccountChanges) -> Self {
        Self {
            first_name: changes.first_name,
            last_name: changes.last_name,
            email: changes.email,
            country: changes.country,
            city: changes.city,
            address: changes.address,
            mobile_phone: changes.mobile_phone,
            username: changes.username,
            password_hash: changes.password_hash,
            is_active: changes.is_active,
            updated_at: None,
        }
    }
}

#[async_trait]
impl AccountStore for PgClient {
    async fn insert(&self, account: NewAccount) -> Result<Account> {
        let mut conn = self.get_connection().await?;
        let row = conn.create_account(account.into()).await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let mut conn = self.get_connection().await?;
        let row = conn.find_account_by_id(id).await?;
        Ok(row.map(Account::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let mut conn = self.get_connection().await?;
        let row = conn.find_account_by_email(email).await?;
        Ok(row.map(Account::from))
    }

    async fn find_all_active(&self) -> Result<Vec<Account>> {
        let mut conn = self.get_connection().await?;
        let rows = conn.list_active_accounts().await?;
        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn update(&self, id: Uuid, changes: AccountChanges) -> Result<Account> {
        let mut conn = self.get_connection().await?;
        conn.update_active_account(id, changes.into())
            .await?
            .map(Account::from)
            .ok_or(Error::NotFound { id })
    }

    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        Ok(conn.email_exists_for_other(email, exclude).await?)
    }

    async fn mobile_phone_in_use(
        &self,
        mobile_phone: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        Ok(conn
            .mobile_phone_exists_for_other(mobile_phone, exclude)
            .await?)
    }

    async fn health(&self) -> StoreHealth {
        self.check_health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_constraint_errors_are_internal() {
        let error: Error = PgError::Config("bad url".into()).into();
        assert!(matches!(error, Error::Internal { service: "postgres", .. }));
    }

    #[test]
    fn changes_keep_absent_columns_unset() {
        let update = model::UpdateAccount::from(AccountChanges::deactivate());
        assert_eq!(update.is_active, Some(false));
        assert!(update.email.is_none());
        assert!(update.updated_at.is_none());
    }
}
