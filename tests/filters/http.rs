//! Full axum HTTP roundtrip with a reqwest client.

use std::sync::Arc;

use serde_json::{json, Value};
use sourced_filters::service::router;
use sourced_filters::{FilterService, InMemoryModelStore};
use tokio::net::TcpListener;

use crate::support::RecordingNotifier;

async fn spawn_server() -> (String, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let service = Arc::new(FilterService::new(InMemoryModelStore::new(), notifier.clone()));
    let app = router(service);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), notifier)
}

#[tokio::test]
async fn filter_lifecycle_over_http() {
    let (base, notifier) = spawn_server().await;
    let client = reqwest::Client::new();

    // 1. Create
    let resp = client
        .put(format!("{}/filters/f1", base))
        .json(&json!({ "description": "d", "items": ["a", "b"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["version"], 1);

    // 2. Create again → 409
    let resp = client
        .put(format!("{}/filters/f1", base))
        .json(&json!({ "items": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    // 3. Update
    let resp = client
        .post(format!("{}/filters/f1/_update", base))
        .json(&json!({ "add_items": ["c"], "remove_items": ["a"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["filter"]["filter_id"], "f1");
    assert_eq!(body["filter"]["items"], json!(["b", "c"]));
    assert_eq!(notifier.calls(), 1);

    // 4. Removing an absent item → 400
    let resp = client
        .post(format!("{}/filters/f1/_update", base))
        .json(&json!({ "remove_items": ["z"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Cannot remove item [z] as it is not present in filter [f1]"
    );

    // 5. Read back
    let resp = client
        .get(format!("{}/filters/f1", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["version"], 2);
    assert_eq!(body["filter"]["description"], "d");

    // 6. Delete, then 404
    let resp = client
        .delete(format!("{}/filters/f1", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(format!("{}/filters/f1/_update", base))
        .json(&json!({ "add_items": ["x"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn invalid_filter_id_is_rejected() {
    let (base, _notifier) = spawn_server().await;

    let resp = reqwest::Client::new()
        .put(format!("{}/filters/Not-Valid", base))
        .json(&json!({ "items": ["a"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}
