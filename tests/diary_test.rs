mod common;

use common::spawn_app;
use serde_json::{json, Value};

#[tokio::test]
async fn unsaved_day_is_empty() {
    let app = spawn_app().await;
    let token = app.register("dana").await;

    let body: Value = app
        .get("/diary/2026-10-14", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["diary"]["entry_date"], "2026-10-14");
    assert_eq!(body["diary"]["food_log"], json!([]));
    assert_eq!(body["diary"]["report"]["net_calories"], 0);
    assert!(body["diary"]["updated_at"].is_null());
}

#[tokio::test]
async fn saving_a_day_twice_keeps_one_entry() {
    let app = spawn_app().await;
    let token = app.register("erin").await;

    let first = json!({
        "food_log": [{ "name": "Oatmeal", "calories": 350, "time": "08:00" }],
        "exercise_log": [],
        "notes": "slow start"
    });
    let response = app
        .put("/diary/2026-10-14", &token)
        .json(&first)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let second = json!({
        "food_log": [
            { "name": "Oatmeal", "calories": 350, "time": "08:00" },
            { "name": "Salad", "calories": 420, "time": "13:00" }
        ],
        "exercise_log": [{ "name": "Cycling", "duration": 45, "calories": 400 }],
        "notes": "better"
    });
    let body: Value = app
        .put("/diary/2026-10-14", &token)
        .json(&second)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["diary"]["report"]["calories_consumed"], 770);
    assert_eq!(body["diary"]["report"]["calories_burned"], 400);
    assert_eq!(body["diary"]["report"]["net_calories"], 370);

    app.put("/diary/2026-10-15", &token)
        .json(&json!({ "notes": "next day" }))
        .send()
        .await
        .unwrap();

    let all: Value = app
        .get("/diary", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = all["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    let dates: Vec<_> = entries.iter().map(|e| e["entry_date"].clone()).collect();
    assert_eq!(dates, vec![json!("2026-10-15"), json!("2026-10-14")]);

    let day: Value = app
        .get("/diary/2026-10-14", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(day["diary"]["notes"], "better");
    assert_eq!(day["diary"]["food_log"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn concurrent_saves_never_duplicate_a_day() {
    let app = spawn_app().await;
    let token = app.register("finn").await;

    let saves = (0..8).map(|i| {
        app.put("/diary/2026-01-01", &token)
            .json(&json!({ "notes": format!("save {i}") }))
            .send()
    });
    for response in futures_join(saves).await {
        assert_eq!(response.unwrap().status(), 200);
    }

    let all: Value = app
        .get("/diary", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all["entries"].as_array().unwrap().len(), 1);
}

async fn futures_join<F, T>(futures: impl Iterator<Item = F>) -> Vec<T>
where
    F: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handles: Vec<_> = futures.map(tokio::spawn).collect();
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    results
}

#[tokio::test]
async fn entries_are_scoped_per_user() {
    let app = spawn_app().await;
    let gina = app.register("gina").await;
    let hank = app.register("hank").await;

    app.put("/diary/2026-10-14", &gina)
        .json(&json!({ "notes": "gina's day" }))
        .send()
        .await
        .unwrap();

    let body: Value = app
        .get("/diary/2026-10-14", &hank)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["diary"]["notes"], "");
}

#[tokio::test]
async fn invalid_items_and_dates_are_bad_requests() {
    let app = spawn_app().await;
    let token = app.register("ivy").await;

    let response = app
        .put("/diary/2026-10-14", &token)
        .json(&json!({ "food_log": [{ "name": "", "calories": 100 }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let response = app
        .put("/diary/2026-10-14", &token)
        .json(&json!({ "exercise_log": [{ "name": "Run", "duration": 0, "calories": 10 }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let response = app.get("/diary/yesterday", &token).send().await.unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn extreme_values_are_rejected_and_leave_the_day_readable() {
    let app = spawn_app().await;
    let token = app.register("jules").await;
    let huge = i64::MAX / 2 + 1;

    let oversized = [
        json!({ "food_log": [
            { "name": "Toast", "calories": huge },
            { "name": "Jam", "calories": huge }
        ] }),
        json!({ "food_log": [{ "name": "Feast", "calories": 100_001 }] }),
        json!({ "exercise_log": [{ "name": "Walk", "duration": 1_441, "calories": 10 }] }),
        json!({ "exercise_log": [{ "name": "Row", "duration": 60, "calories": huge }] }),
        json!({ "exercise_log": [{ "name": "Row", "duration": 60, "calories": -1 }] }),
    ];
    for body in &oversized {
        let response = app
            .put("/diary/2026-10-14", &token)
            .json(body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400, "accepted {body}");
    }

    let response = app.get("/diary/2026-10-14", &token).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let day: Value = response.json().await.unwrap();
    assert!(day["diary"]["updated_at"].is_null());

    let response = app.get("/diary", &token).send().await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn values_at_the_limits_are_accepted() {
    let app = spawn_app().await;
    let token = app.register("kai").await;

    let body: Value = app
        .put("/diary/2026-10-14", &token)
        .json(&json!({
            "food_log": [{ "name": "Feast", "calories": 100_000 }],
            "exercise_log": [{ "name": "Ultra", "duration": 1_440, "calories": 100_000 }]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["diary"]["report"]["calories_consumed"], 100_000);
    assert_eq!(body["diary"]["report"]["net_calories"], 0);
}
