//! Error types for the UI loop.

use thiserror::Error;

/// Errors that can occur while talking to a running [`UiActor`](crate::lifecycle::UiActor).
///
/// The list model itself never fails; these only describe the channel between a
/// [`UiClient`](crate::lifecycle::UiClient) and the loop.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UiError {
    /// The loop has stopped and no longer accepts actions.
    #[error("UI loop closed")]
    LoopClosed,

    /// The loop dropped the reply channel before answering.
    #[error("UI loop dropped response channel")]
    LoopDropped,
}
