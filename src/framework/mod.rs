//! Generic observable list framework.
//!
//! This module provides the building blocks for exposing a typed, changing collection of
//! records to a rendering layer that only speaks rows, roles and events.
//!
//! # Main Components
//!
//! - [`Record`] - Trait that record types implement (field table + [`RecordCore`])
//! - [`ObjectListModel`] - Generic observable list of `Rc<T>` records
//! - [`ListModel`] - Type-erased view used by the rendering layer and for nested lists
//! - [`ModelEvent`] - Rows inserted / removed, data changed, count changed
//! - [`Signal`] / [`Subscription`] - Callback registry with RAII disconnection
//!
//! # Testing
//!
//! See [`recorder`] for an observer that records events for assertions.

pub mod list;
pub mod model;
pub mod record;
pub mod recorder;
pub mod roles;
pub mod signal;
pub mod value;

// Re-export core types for convenience
pub use list::{ListOptions, ModelEvent, ObjectListModel};
pub use model::ListModel;
pub use record::{FieldDescriptor, FieldKind, ListId, Ownership, Property, Record, RecordCore};
pub use recorder::EventRecorder;
pub use roles::{Role, RoleConfigError, RoleTable};
pub use signal::{Signal, Subscription};
pub use value::{FieldValue, FromFieldValue};
