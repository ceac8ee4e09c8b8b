//! # UI Loop
//!
//! Records and lists live in `Rc`s and are confined to one thread, so the whole page model
//! is owned by a single task: the [`UiActor`]. Everything else talks to it through a
//! cloneable [`UiClient`] that sends [`UiAction`]s over an mpsc channel and awaits the
//! answer on a oneshot channel.
//!
//! Replies are plain snapshots ([`PageSnapshot`]) so they can cross task boundaries.
//!
//! The actor future is `!Send`. Spawn it on a [`tokio::task::LocalSet`]:
//!
//! ```rust
//! use object_list_model::lifecycle::{DemoConfig, UiActor};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), object_list_model::lifecycle::UiError> {
//! let local = tokio::task::LocalSet::new();
//! local
//!     .run_until(async {
//!         let (actor, client) = UiActor::new(DemoConfig::default());
//!         let handle = tokio::task::spawn_local(actor.run());
//!
//!         let page = client.add_page().await?;
//!         assert_eq!(page.name, "Page 1");
//!
//!         drop(client);
//!         let final_state = handle.await.expect("UI loop panicked");
//!         assert_eq!(final_state.len(), 1);
//!         Ok(())
//!     })
//!     .await
//! # }
//! ```

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::framework::ModelEvent;
use crate::lifecycle::config::DemoConfig;
use crate::lifecycle::controller::PageController;
use crate::lifecycle::error::UiError;
use crate::model::PageSnapshot;

/// One-shot reply channel carried by every [`UiAction`].
pub type Response<T> = oneshot::Sender<T>;

/// A user interaction forwarded to the UI loop.
///
/// Each variant maps to one [`PageController`] call.
#[derive(Debug)]
pub enum UiAction {
    AddPage {
        respond_to: Response<PageSnapshot>,
    },
    ClearAllPages {
        respond_to: Response<()>,
    },
    AddListItem {
        main_id: i64,
        respond_to: Response<usize>,
    },
    UpdateListItem {
        main_id: i64,
        respond_to: Response<usize>,
    },
    ClearListItems {
        main_id: i64,
        respond_to: Response<usize>,
    },
    Snapshot {
        respond_to: Response<Vec<PageSnapshot>>,
    },
}

/// The task that owns the page model.
///
/// Actions are processed one at a time, so no list is ever touched from two places at once.
pub struct UiActor {
    receiver: mpsc::Receiver<UiAction>,
    controller: PageController,
}

impl UiActor {
    /// Creates the actor and the first client. The channel capacity is `config.buffer_size`.
    pub fn new(config: DemoConfig) -> (Self, UiClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size.max(1));
        let actor = Self {
            receiver,
            controller: PageController::new(config),
        };
        (actor, UiClient::new(sender))
    }

    pub fn controller(&self) -> &PageController {
        &self.controller
    }

    /// Processes actions until every client is dropped, then returns the final state.
    pub async fn run(mut self) -> Vec<PageSnapshot> {
        info!("UI loop started");
        let _render = self.controller.pages().subscribe(|event| match event {
            ModelEvent::CountChanged(count) => debug!(count, "Page count changed"),
            other => debug!(event = ?other, "Page list changed"),
        });

        while let Some(action) = self.receiver.recv().await {
            match action {
                UiAction::AddPage { respond_to } => {
                    let page = self.controller.add_page();
                    let _ = respond_to.send(page.snapshot());
                }
                UiAction::ClearAllPages { respond_to } => {
                    self.controller.clear_all_pages();
                    let _ = respond_to.send(());
                }
                UiAction::AddListItem { main_id, respond_to } => {
                    let _ = respond_to.send(self.controller.add_list_item(main_id));
                }
                UiAction::UpdateListItem { main_id, respond_to } => {
                    let _ = respond_to.send(self.controller.update_list_item(main_id));
                }
                UiAction::ClearListItems { main_id, respond_to } => {
                    let _ = respond_to.send(self.controller.clear_list_items(main_id));
                }
                UiAction::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.controller.snapshot());
                }
            }
        }

        let final_state = self.controller.snapshot();
        info!(pages = final_state.len(), "UI loop shutdown");
        final_state
    }
}

/// Handle for sending actions to a running [`UiActor`].
#[derive(Clone, Debug)]
pub struct UiClient {
    sender: mpsc::Sender<UiAction>,
}

impl UiClient {
    pub fn new(sender: mpsc::Sender<UiAction>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        action: impl FnOnce(Response<R>) -> UiAction,
    ) -> Result<R, UiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(action(respond_to))
            .await
            .map_err(|_| UiError::LoopClosed)?;
        response.await.map_err(|_| UiError::LoopDropped)
    }

    pub async fn add_page(&self) -> Result<PageSnapshot, UiError> {
        self.request(|respond_to| UiAction::AddPage { respond_to })
            .await
    }

    pub async fn clear_all_pages(&self) -> Result<(), UiError> {
        self.request(|respond_to| UiAction::ClearAllPages { respond_to })
            .await
    }

    pub async fn add_list_item(&self, main_id: i64) -> Result<usize, UiError> {
        self.request(|respond_to| UiAction::AddListItem { main_id, respond_to })
            .await
    }

    pub async fn update_list_item(&self, main_id: i64) -> Result<usize, UiError> {
        self.request(|respond_to| UiAction::UpdateListItem { main_id, respond_to })
            .await
    }

    pub async fn clear_list_items(&self, main_id: i64) -> Result<usize, UiError> {
        self.request(|respond_to| UiAction::ClearListItems { main_id, respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<Vec<PageSnapshot>, UiError> {
        self.request(|respond_to| UiAction::Snapshot { respond_to })
            .await
    }
}
