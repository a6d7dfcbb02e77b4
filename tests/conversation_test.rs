mod common;

use common::spawn_app;
use serde_json::{json, Value};

#[tokio::test]
async fn conversation_is_absent_until_saved() {
    let app = spawn_app().await;
    let token = app.register("nora").await;

    let body: Value = app
        .get("/conversation", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["conversation"].is_null());
}

#[tokio::test]
async fn saving_replaces_the_single_conversation() {
    let app = spawn_app().await;
    let token = app.register("oscar").await;

    let first = json!({
        "messages": [
            { "role": "assistant", "content": "Hello!", "timestamp": "2026-10-14T08:00:00Z" },
            { "role": "user", "content": "hi", "timestamp": "2026-10-14T08:00:05Z" }
        ]
    });
    let response = app
        .put("/conversation", &token)
        .json(&first)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let second = json!({
        "messages": [
            { "role": "assistant", "content": "Hello!", "timestamp": "2026-10-14T08:00:00Z" },
            { "role": "user", "content": "hi", "timestamp": "2026-10-14T08:00:05Z" },
            { "role": "assistant", "content": "How can I help?", "timestamp": "2026-10-14T08:00:06Z" }
        ]
    });
    app.put("/conversation", &token)
        .json(&second)
        .send()
        .await
        .unwrap();

    let body: Value = app
        .get("/conversation", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let messages = body["conversation"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2]["role"], "assistant");
    assert_eq!(messages[2]["content"], "How can I help?");
}

#[tokio::test]
async fn unknown_roles_are_rejected() {
    let app = spawn_app().await;
    let token = app.register("pia").await;

    let response = app
        .put("/conversation", &token)
        .json(&json!({
            "messages": [{ "role": "system", "content": "x", "timestamp": "2026-10-14T08:00:00Z" }]
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}
