#![forbid(unsafe_code)]

/// `embed_migrations!` cannot detect changes to migration files on its own,
/// so the crate is rebuilt whenever the migration directory changes.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
