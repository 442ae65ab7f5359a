//! Account row, insert and changeset models.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::accounts;

/// A row of the `accounts` table.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Title-cased first name.
    pub first_name: String,
    /// Title-cased last name.
    pub last_name: String,
    /// Login email with a lowercased domain.
    pub email: String,
    pub country: String,
    pub city: String,
    pub address: String,
    /// Phone in `+<code> <digits>` form.
    pub mobile_phone: String,
    /// Always equal to the first name.
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Cleared on soft deletion.
    pub is_active: bool,
    /// Grants access to every account.
    pub is_admin: bool,
    pub is_superuser: bool,
    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new account.
///
/// `is_active` and the timestamps take their column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccount {
    pub id: Uuid,
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

/// Data for updating an account. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateAccount {
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
    pub updated_at: Option<Timestamp>,
}
