//! Widget driving the real chat service in-process.
//!
//! Every request lands on a brand-new service instance with an empty session
//! cache, so the conversation only progresses if the widget's echoed state
//! carries it.

use std::sync::Arc;

use async_trait::async_trait;
use sensei_client::storage::{DATA_KEY, STATE_KEY};
use sensei_client::{ClientError, ClientStorage, MemoryStorage, Transport, Widget};
use sensei_core::{ChatRequest, ChatResponse, ChatService, Engine, MemorySessionStore};

struct FreshInstancePerRequest;

#[async_trait]
impl Transport for FreshInstancePerRequest {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let service = ChatService::new(Engine::default(), Arc::new(MemorySessionStore::new()));
        service
            .handle(request.clone())
            .await
            .map_err(|e| ClientError::UnexpectedResponse(e.to_string()))
    }
}

fn widget() -> (Widget, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let widget = Widget::new(Arc::new(FreshInstancePerRequest), storage.clone());
    (widget, storage)
}

#[tokio::test]
async fn test_full_purchase_across_stateless_instances() {
    let (widget, storage) = widget();

    let reply = widget.open().await.unwrap();
    assert_eq!(reply.buttons(), ["Yes", "Not now"]);
    assert_eq!(storage.get(STATE_KEY).as_deref(), Some("consent"));

    widget.press("Yes").await.unwrap();
    widget.press("Ace my next grading (kata)").await.unwrap();
    widget.press("Timing/flow").await.unwrap();
    let reply = widget.press("1–3").await.unwrap();
    assert!(reply.messages[0].text.contains("Ace my next grading (kata)"));
    assert!(reply.messages[0].text.contains("Timing/flow"));

    let reply = widget.send("nope").await.unwrap();
    assert_eq!(storage.get(STATE_KEY).as_deref(), Some("email"));
    assert!(reply.messages[0].text.contains("valid email"));

    let reply = widget.send("sensei@dojo.com").await.unwrap();
    assert!(reply.messages[0].text.contains("Kata Mastery Blueprint"));

    let reply = widget.press("Yes, start now").await.unwrap();
    let url = reply.checkout_url.expect("checkout url");
    assert!(url.starts_with("https://shotokankaraterebel.com/coming-soon/"));
    assert!(url.contains("tag=tc_kata_core"));
    assert!(url.contains("email=sensei%40dojo.com"));
    assert_eq!(storage.get(STATE_KEY).as_deref(), Some("checkout"));

    let data: serde_json::Value =
        serde_json::from_str(&storage.get(DATA_KEY).unwrap()).unwrap();
    assert_eq!(data["bucket"], "kata");
    assert_eq!(data["years"], "1–3");
}

#[tokio::test]
async fn test_freebie_then_start_over() {
    let (widget, storage) = widget();
    widget.open().await.unwrap();

    widget.press("Not now").await.unwrap();
    let reply = widget.press("Maybe later").await.unwrap();
    assert!(reply.messages[0].text.contains("Come back anytime"));
    assert_eq!(storage.get(STATE_KEY).as_deref(), Some("end"));

    // Next message falls to the restart prompt
    let reply = widget.send("hi again").await.unwrap();
    assert_eq!(reply.buttons(), ["Start"]);

    // "Start" clears local state, so the server treats it as a fresh consent turn
    widget.press("Start").await.unwrap();
    assert_eq!(storage.get(STATE_KEY).as_deref(), Some("freebie"));
}
