//! Schema migrations embedded into the binary.
//!
//! Use [`PgClientMigrationExt::run_pending_migrations`] at startup; it is
//! idempotent and applies nothing when the schema is current.

mod client_ext;
mod migrate_result;
mod run_migration;

pub use client_ext::PgClientMigrationExt;
pub use migrate_result::MigrationResult;
pub use run_migration::run_pending_migrations;
