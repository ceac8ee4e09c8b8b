use std::rc::Rc;

use object_list_model::framework::{EventRecorder, ModelEvent, Record, Role};
use object_list_model::lifecycle::{DemoConfig, PageController, UiActor, UiError};
use object_list_model::model::Page;
use tokio::task::{spawn_local, LocalSet};

#[test]
fn update_renames_second_item_in_place() {
    let mut controller = PageController::new(DemoConfig::default());
    let page = controller.add_page();
    for _ in 0..3 {
        controller.add_list_item(page.get_main_id());
    }
    let recorder = EventRecorder::attach(page.items());

    controller.update_list_item(page.get_main_id());

    let subname = page.items().role_for_name("subname").unwrap();
    assert_eq!(
        recorder.take(),
        vec![ModelEvent::DataChanged {
            row: 1,
            roles: vec![subname, Role::DISPLAY],
        }]
    );
    assert_eq!(page.items().count(), 3);
    assert_eq!(page.items().at(1).unwrap().get_subname(), "Update TEST!");
    assert!(page.items().get_by_uid("Update TEST!").is_some());
    assert!(page.items().get_by_uid("SubName 1").is_none());
}

#[test]
fn clearing_all_pages_tears_everything_down() {
    let mut controller = PageController::new(DemoConfig::default());
    let pages: Vec<Rc<Page>> = (0..2).map(|_| controller.add_page()).collect();
    for page in &pages {
        controller.add_list_item(page.get_main_id());
    }
    let items: Vec<_> = pages.iter().flat_map(|p| p.items().to_vec()).collect();
    let recorder = EventRecorder::attach(controller.pages());

    controller.clear_all_pages();

    assert_eq!(
        recorder.take(),
        vec![ModelEvent::RowsRemoved(0..2), ModelEvent::CountChanged(0)]
    );
    assert!(pages.iter().all(|p| !p.core().is_alive()));
    assert!(items.iter().all(|i| !i.core().is_alive()));
    assert_eq!(controller.counter(), 0);
}

#[test]
fn custom_config_drives_names() {
    let config = DemoConfig {
        page_prefix: "Sheet".into(),
        item_prefix: "Row".into(),
        ..DemoConfig::default()
    };
    let mut controller = PageController::new(config);
    let page = controller.add_page();
    controller.add_list_item(0);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot[0].name, "Sheet 1");
    assert_eq!(snapshot[0].items[0].subname, "Row 0");
    assert_eq!(page.items().count(), 1);
}

#[tokio::test]
async fn scripted_session_through_the_ui_loop() {
    LocalSet::new()
        .run_until(async {
            let (actor, client) = UiActor::new(DemoConfig::default());
            let handle = spawn_local(actor.run());

            let first = client.add_page().await.unwrap();
            let second = client.add_page().await.unwrap();
            assert_eq!((first.main_id, second.main_id), (0, 1));

            for _ in 0..3 {
                client.add_list_item(first.main_id).await.unwrap();
            }
            client.add_list_item(second.main_id).await.unwrap();
            assert_eq!(client.update_list_item(first.main_id).await.unwrap(), 1);
            assert_eq!(client.update_list_item(second.main_id).await.unwrap(), 0);

            assert_eq!(client.clear_list_items(second.main_id).await.unwrap(), 1);
            let pages = client.snapshot().await.unwrap();
            assert_eq!(pages[0].items.len(), 3);
            assert!(pages[1].items.is_empty());

            let json = serde_json::to_value(&pages).unwrap();
            assert_eq!(json[0]["items"][1]["subname"], "Update TEST!");

            client.clear_all_pages().await.unwrap();
            let again = client.add_page().await.unwrap();
            assert_eq!(again.name, "Page 1");

            let late = client.clone();
            drop(client);
            let snapshot = late.snapshot().await.unwrap();
            drop(late);

            let final_state = handle.await.unwrap();
            assert_eq!(final_state, snapshot);
        })
        .await;
}

#[tokio::test]
async fn requests_after_shutdown_fail() {
    LocalSet::new()
        .run_until(async {
            let (actor, client) = UiActor::new(DemoConfig::default());
            let handle = spawn_local(actor.run());
            client.add_page().await.unwrap();
            handle.abort();
            let _ = handle.await;

            assert_eq!(client.snapshot().await, Err(UiError::LoopClosed));
        })
        .await;
}
