//! # Object List Model Demo
//!
//! Drives the page model through the same sequence of button clicks the demo UI offers:
//! 1. Add two pages.
//! 2. Add three items to the first page and rename the second one.
//! 3. Clear the items of the second page, then clear everything.
//!
//! The model lives on a [`UiActor`] spawned on a `LocalSet`; this binary only talks to it
//! through a [`UiClient`](object_list_model::lifecycle::UiClient).

use object_list_model::lifecycle::tracing::setup_tracing;
use object_list_model::lifecycle::{DemoConfig, UiActor};
use tokio::task::{spawn_local, LocalSet};
use tracing::{debug, info, info_span, Instrument};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = DemoConfig::default();
    debug!(?config, "Starting demo");

    let local = LocalSet::new();
    let final_state = local
        .run_until(async move {
            let (actor, client) = UiActor::new(config);
            let handle = spawn_local(actor.run());

            let session = async {
                let first = client.add_page().await.map_err(|e| e.to_string())?;
                client.add_page().await.map_err(|e| e.to_string())?;

                for _ in 0..3 {
                    client
                        .add_list_item(first.main_id)
                        .await
                        .map_err(|e| e.to_string())?;
                }
                client
                    .update_list_item(first.main_id)
                    .await
                    .map_err(|e| e.to_string())?;

                let pages = client.snapshot().await.map_err(|e| e.to_string())?;
                let json = serde_json::to_string_pretty(&pages).map_err(|e| e.to_string())?;
                info!(pages = pages.len(), "Model state:\n{json}");

                client
                    .clear_list_items(first.main_id + 1)
                    .await
                    .map_err(|e| e.to_string())?;
                client.clear_all_pages().await.map_err(|e| e.to_string())?;
                Ok::<_, String>(())
            }
            .instrument(info_span!("ui_session"))
            .await;

            drop(client);
            let final_state = handle.await.map_err(|e| e.to_string())?;
            session.map(|()| final_state)
        })
        .await?;

    info!(pages = final_state.len(), "Application completed");
    Ok(())
}
