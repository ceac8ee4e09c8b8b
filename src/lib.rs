#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Object List Model
//!
//! > **Typed record lists, exposed to a rendering layer as rows, roles and change events.**
//!
//! A rendering layer (a list view, a table, a template engine) only understands a flat
//! protocol: *how many rows*, *what is the value of role R at row N*, and *tell me when
//! something changes*. Application code wants to work with real records instead. This crate
//! sits in between.
//!
//! ## 🏗️ Design
//!
//! - A record type declares its fields once (a [`field_table!`]) and gets typed accessors
//!   from [`writable_property!`] and friends. Setters return `true` only on a real change.
//! - [`ObjectListModel<T>`](framework::ObjectListModel) holds `Rc<T>` records, derives role
//!   numbers from the field table, and forwards every field change as a
//!   [`DataChanged`](framework::ModelEvent::DataChanged) event for the affected row.
//! - A list owns the records it adopts. Removing one destroys it; a record that owns lists
//!   of its own tears them down in [`Record::on_destroy`](framework::Record::on_destroy).
//! - [`ListModel`](framework::ListModel) is the type-erased view, used both by the rendering
//!   layer and for lists nested inside records.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Signals, field values, records, roles and the generic list.
//! - **Key items**: [`ObjectListModel`](framework::ObjectListModel),
//!   [`Record`](framework::Record), [`ModelEvent`](framework::ModelEvent).
//!
//! ### 2. The Records ([`model`])
//! The demo's [`Page`](model::Page), which owns a nested list of [`Item`](model::Item)s.
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! [`PageController`](lifecycle::PageController) turns button clicks into list calls;
//! [`UiActor`](lifecycle::UiActor) owns it on a single task behind a channel.
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod framework;
pub mod lifecycle;
pub mod model;

#[doc(hidden)]
pub use paste;
