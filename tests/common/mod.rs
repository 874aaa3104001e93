#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use shorten_api::state::AppState;

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(Arc::new(pool))
}

pub fn create_test_server(pool: SqlitePool) -> TestServer {
    let app = shorten_api::routes::router(create_test_state(pool));
    TestServer::new(app).unwrap()
}

pub async fn insert_mapping(pool: &SqlitePool, code: &str, url: &str) -> i64 {
    insert_mapping_at(pool, code, url, Utc::now()).await
}

pub async fn insert_mapping_at(
    pool: &SqlitePool,
    code: &str,
    url: &str,
    created_at: DateTime<Utc>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO url_maps (url, short_code, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?3) RETURNING id",
    )
    .bind(url)
    .bind(code)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn access_count(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT access_count FROM url_maps WHERE short_code = ?1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_mappings(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_maps")
        .fetch_one(pool)
        .await
        .unwrap()
}
