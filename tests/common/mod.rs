#![allow(dead_code)]

use std::{net::TcpListener, time::Duration};

use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use tempfile::TempDir;
use wellness::{init_db, serve, Config};

pub struct TestApp {
    pub address: String,
    pub client: Client,
    _db_dir: TempDir,
}

/// Starts the API on an ephemeral port against a fresh SQLite file with the
/// assistant delays disabled.
pub async fn spawn_app() -> TestApp {
    let db_dir = tempfile::tempdir().expect("temp dir");
    let database_url = format!("sqlite://{}", db_dir.path().join("test.db").display());
    let config = Config {
        database_url,
        jwt_secret: "integration-test-secret".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        chat_delay: Duration::ZERO,
        scan_delay: Duration::ZERO,
        token_ttl: time::Duration::days(1),
    };
    let pool = init_db(&config.database_url).await.expect("database");
    let listener = TcpListener::bind("127.0.0.1:0").expect("listener");
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(serve(listener, pool, config));

    TestApp {
        address,
        client: Client::new(),
        _db_dir: db_dir,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn get(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(token)
    }

    pub fn post(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(token)
    }

    pub fn put(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.put(self.url(path)).bearer_auth(token)
    }

    /// Registers `username` and returns its bearer token.
    pub async fn register(&self, username: &str) -> String {
        let response = self
            .client
            .post(self.url("/users"))
            .json(&json!({
                "user": {
                    "email": format!("{username}@example.com"),
                    "username": username,
                    "password": "correct horse battery staple",
                }
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        body["user"]["token"].as_str().unwrap().to_string()
    }
}
