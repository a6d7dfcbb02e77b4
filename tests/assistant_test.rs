mod common;

use common::spawn_app;
use serde_json::{json, Value};
use wellness::assistant::{Topic, CONDITIONS};

#[tokio::test]
async fn health_check_is_alive() {
    let app = spawn_app().await;
    let response = app.client.get(app.url("/check_health")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "alive");
}

#[tokio::test]
async fn chat_replies_from_the_matching_bucket() {
    let app = spawn_app().await;
    let cases = [
        ("Hello!", Topic::Greeting),
        ("Any workout tips?", Topic::Exercise),
        ("What should I eat for breakfast", Topic::Nutrition),
        ("I can't sleep", Topic::Sleep),
        ("dealing with anxiety", Topic::Stress),
        ("Should I drink more", Topic::Hydration),
        ("my knee hurts", Topic::General),
    ];
    for (message, topic) in cases {
        let response = app
            .client
            .post(app.url("/functions/v1/chat"))
            .json(&json!({ "message": message, "history": [] }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        let text = body["response"].as_str().unwrap();
        assert!(topic.responses().contains(&text), "{message}: {text}");
    }
}

#[tokio::test]
async fn chat_accepts_history() {
    let app = spawn_app().await;
    let response = app
        .client
        .post(app.url("/functions/v1/chat"))
        .json(&json!({
            "message": "hey",
            "history": [
                { "role": "assistant", "content": "Hello! How can I help you today?" },
                { "role": "user", "content": "hi" }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn chat_without_message_is_bad_request() {
    let app = spawn_app().await;
    for body in [json!({}), json!({ "message": "" }), json!({ "history": [] })] {
        let response = app
            .client
            .post(app.url("/functions/v1/chat"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "No message provided");
    }
}

#[tokio::test]
async fn malformed_chat_body_is_a_server_error() {
    let app = spawn_app().await;
    let response = app
        .client
        .post(app.url("/functions/v1/chat"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to process message");
}

#[tokio::test]
async fn scan_returns_a_table_entry() {
    let app = spawn_app().await;
    for _ in 0..10 {
        let response = app
            .client
            .post(app.url("/functions/v1/scan"))
            .json(&json!({ "image": "data:image/png;base64,iVBORw0KGgo=" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        let entry = CONDITIONS
            .iter()
            .find(|c| c.condition == body["condition"])
            .expect("condition from the table");
        assert_eq!(body["confidence"], entry.confidence);
        assert_eq!(body["tips"].as_array().unwrap().len(), entry.tips.len());
    }
}

#[tokio::test]
async fn scan_without_image_is_bad_request() {
    let app = spawn_app().await;
    for body in [json!({}), json!({ "image": "" })] {
        let response = app
            .client
            .post(app.url("/functions/v1/scan"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "No image provided");
    }
}

#[tokio::test]
async fn authenticated_scans_are_recorded() {
    let app = spawn_app().await;
    let token = app.register("scanner").await;

    let response = app
        .post("/functions/v1/scan", &token)
        .json(&json!({ "image": "data:image/jpeg;base64,/9j/4AAQ" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let scan: Value = response.json().await.unwrap();

    // Anonymous scans are not stored anywhere.
    app.client
        .post(app.url("/functions/v1/scan"))
        .json(&json!({ "image": "data:image/jpeg;base64,/9j/4AAQ" }))
        .send()
        .await
        .unwrap();

    let history: Value = app
        .get("/scans", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let scans = history["scans"].as_array().unwrap();
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0]["detected_condition"], scan["condition"]);
    assert_eq!(scans[0]["confidence"], scan["confidence"]);
    assert_eq!(scans[0]["prevention_tips"], scan["tips"]);
}

#[tokio::test]
async fn scan_treats_a_foreign_token_as_anonymous() {
    let app = spawn_app().await;
    let token = app.register("viewer").await;

    let response = app
        .post("/functions/v1/scan", "anon-key-not-a-jwt")
        .json(&json!({ "image": "data:image/jpeg;base64,/9j/4AAQ" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(CONDITIONS.iter().any(|c| body["condition"] == c.condition));

    let response = app
        .post("/functions/v1/scan", "anon-key-not-a-jwt")
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No image provided");

    let history: Value = app
        .get("/scans", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history["scans"], json!([]));
}

#[tokio::test]
async fn cors_preflight_is_open() {
    let app = spawn_app().await;
    let response = app
        .client
        .request(reqwest::Method::OPTIONS, app.url("/functions/v1/chat"))
        .header("origin", "https://example.org")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
