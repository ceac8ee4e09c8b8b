//! # Lifecycle
//!
//! Everything above the list engine: the demo controller, the task that owns the model,
//! and process setup.
//!
//! - [`PageController`]: the button handlers, expressed as list calls.
//! - [`UiActor`] / [`UiClient`]: a single-task loop owning the controller, driven over a channel.
//! - [`DemoConfig`]: names, texts and channel size.
//! - [`setup_tracing`](tracing::setup_tracing): subscriber installation.

pub mod config;
pub mod controller;
pub mod error;
pub mod tracing;
pub mod ui_actor;

pub use config::DemoConfig;
pub use controller::PageController;
pub use error::UiError;
pub use ui_actor::{UiAction, UiActor, UiClient};
