//! Repositories that run typed queries on a [`PgConnection`].
//!
//! [`PgConnection`]: crate::PgConnection

pub mod account;

pub use account::AccountRepository;
