pub mod assistant;
mod authentication;
pub mod catalog;
pub mod config;
mod data_formats;
mod db_helpers;
pub mod errors;
mod handlers;
pub mod models;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::{Request, StatusCode};
use axum::{body::Body, routing::*, Extension, Json, Router};
pub use config::Config;
pub use data_formats::*;
use handlers::*;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::{net::TcpListener, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;

pub type JsonResponse<T> = (StatusCode, Json<T>);

pub async fn run_app(config: Config) -> Result<()> {
    let db = init_db(&config.database_url).await?;
    let listener = TcpListener::bind(config.bind_addr)
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    serve(listener, db, config).await
}

/// Serves the API on an already bound listener until the server fails.
pub async fn serve(listener: TcpListener, db: SqlitePool, config: Config) -> Result<()> {
    listener.set_nonblocking(true)?;
    let address = listener.local_addr()?;
    let app = with_layers(make_router(), db, config);
    tracing::info!(addr = %address, "starting server");
    axum::Server::from_tcp(listener)?
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        tracing::info!(db_url, "creating database");
        Sqlite::create_database(db_url)
            .await
            .with_context(|| format!("Failed to create database {db_url}"))?;
    } else {
        tracing::info!(db_url, "database already exists");
    }
    let pool = SqlitePool::connect(db_url).await?;
    tracing::info!("running migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("migrations completed");
    Ok(pool)
}

/// Shared state, CORS and request tracing around the API routes.
pub fn with_layers(app: Router, db: SqlitePool, config: Config) -> Router {
    app.layer(Extension(Arc::new(db)))
        .layer(Extension(Arc::new(config)))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

pub fn make_router() -> Router {
    Router::new()
        .route("/check_health", get(alive))
        .route("/users/login", post(login_user))
        .route("/users", post(register_user))
        .route("/user", get(get_current_user))
        .route("/functions/v1/chat", post(chat))
        .route("/functions/v1/scan", post(scan))
        .route("/scans", get(list_scans))
        .route("/conversation", get(get_conversation).put(save_conversation))
        .route("/forum/posts", get(list_posts).post(create_post))
        .route("/forum/posts/:id", get(get_post))
        .route("/forum/posts/:id/replies", post(create_reply))
        .route("/forum/posts/:id/like", post(like_post))
        .route("/diary", get(list_diary))
        .route("/diary/:date", get(get_diary).put(save_diary))
        .route("/programs", get(list_programs))
        .route("/programs/enrollments", get(list_enrollments).post(enroll))
        .route("/progress/stats", get(list_stats).post(record_stat))
        .route("/progress/summary", get(progress_summary))
        .fallback(not_found)
}
