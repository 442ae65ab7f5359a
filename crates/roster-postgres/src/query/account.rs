//! Account repository.

use std::future::Future;

use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Account, NewAccount, UpdateAccount};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

diesel::define_sql_function! {
    /// SQL `lower(text)`, matching the expression of the email unique index.
    fn lower(x: Text) -> Text;
}

/// Repository for account database operations.
pub trait AccountRepository {
    /// Inserts a new account and returns the stored row.
    ///
    /// Unique index violations surface as [`PgError::Query`] carrying the
    /// constraint name; see [`PgError::constraint_violation`].
    fn create_account(
        &mut self,
        new_account: NewAccount,
    ) -> impl Future<Output = PgResult<Account>> + Send;

    /// Finds an account by identifier, active or not.
    fn find_account_by_id(
        &mut self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Finds an account by email, ignoring case.
    fn find_account_by_email(
        &mut self,
        email: &str,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Lists active accounts, oldest first.
    fn list_active_accounts(&mut self) -> impl Future<Output = PgResult<Vec<Account>>> + Send;

    /// Updates an active account in one statement.
    ///
    /// Returns `None` if no active account has this identifier.
    fn update_active_account(
        &mut self,
        account_id: Uuid,
        updates: UpdateAccount,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Checks whether an email is used by any account other than `exclude`.
    fn email_exists_for_other(
        &mut self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Checks whether a phone is used by any account other than `exclude`.
    fn mobile_phone_exists_for_other(
        &mut self,
        mobile_phone: &str,
        exclude: Option<Uuid>,
    ) -> impl Future<Output = PgResult<bool>> + Send;
}

impl AccountRepository for PgConnection {
    async fn create_account(&mut self, new_account: NewAccount) -> PgResult<Account> {
        use schema::accounts;

        let account = diesel::insert_into(accounts::table)
            .values(&new_account)
            .returning(Account::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            account_id = %account.id,
            "account row inserted"
        );

        Ok(account)
    }

    async fn find_account_by_id(&mut self, account_id: Uuid) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::id.eq(account_id))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_account_by_email(&mut self, email: &str) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(lower(dsl::email).eq(email.to_lowercase()))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_active_accounts(&mut self) -> PgResult<Vec<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::is_active.eq(true))
            .order((dsl::created_at.asc(), dsl::id.asc()))
            .select(Account::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn update_active_account(
        &mut self,
        account_id: Uuid,
        mut updates: UpdateAccount,
    ) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        updates
            .updated_at
            .get_or_insert_with(|| jiff::Timestamp::now().into());

        diesel::update(
            accounts::table
                .filter(dsl::id.eq(account_id))
                .filter(dsl::is_active.eq(true)),
        )
        .set(&updates)
        .returning(Account::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)
    }

    async fn email_exists_for_other(
        &mut self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> PgResult<bool> {
        use schema::accounts::{self, dsl};

        let mut query = accounts::table
            .filter(lower(dsl::email).eq(email.to_lowercase()))
            .into_boxed();
        if let Some(exclude) = exclude {
            query = query.filter(dsl::id.ne(exclude));
        }

        let count: i64 = query
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(count > 0)
    }

    async fn mobile_phone_exists_for_other(
        &mut self,
        mobile_phone: &str,
        exclude: Option<Uuid>,
    ) -> PgResult<bool> {
        use schema::accounts::{self, dsl};

        let mut query = accounts::table
            .filter(dsl::mobile_phone.eq(mobile_phone))
            .into_boxed();
        if let Some(exclude) = exclude {
            query = query.filter(dsl::id.ne(exclude));
        }

        let count: i64 = query
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(count > 0)
    }
}
