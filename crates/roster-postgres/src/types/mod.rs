//! Types shared by the models and repositories.

mod constraints;

pub use constraints::AccountConstraints;
