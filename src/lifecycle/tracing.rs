//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber filtered by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Controller actions** at `info`, inside a span per action (`add_page`, `update_list_item`, ...)
//! - **List mutations** at `debug`: inserts, removals, moves and per-field changes
//! - **Role configuration problems** at `warn` (reserved or duplicate field names)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Controller actions only
//! RUST_LOG=info cargo run
//!
//! # Every list event as well
//! RUST_LOG=debug cargo run
//!
//! # Only the list engine
//! RUST_LOG=object_list_model::framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` renaming the second item looks like:
//!
//! ```text
//! DEBUG update_list_item{main_id=0}: Data changed record="Item" list=list_2 row=1 roles=[Role(3), Role(1)]
//! INFO update_list_item{main_id=0}: Items updated updated=1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
