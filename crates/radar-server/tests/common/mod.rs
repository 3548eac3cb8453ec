#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use radar_db::{DbRuntimeSettings, SnapshotResolver};
use radar_query::{LimitPolicy, QueryService};
use radar_server::{app, AppState};
use rusqlite::Connection;
use serde_json::Value;
use std::path::Path;
use tower::ServiceExt; // for oneshot

pub fn build_app(dir: &Path) -> Router {
    build_app_with_limits(dir, LimitPolicy::default())
}

pub fn build_app_with_limits(dir: &Path, limits: LimitPolicy) -> Router {
    let service = QueryService::new(SnapshotResolver::new(dir), DbRuntimeSettings::default());
    app(AppState::new(service, limits))
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

/// Creates a snapshot with a `news_items` table holding `rows` of
/// `(title, platform_id, created_at)`.
pub fn seed_news(dir: &Path, name: &str, rows: &[(&str, &str, &str)]) -> Connection {
    let conn = Connection::open(dir.join(name)).expect("failed to create snapshot");
    conn.execute_batch(
        "CREATE TABLE news_items (
            id INTEGER PRIMARY KEY,
            title TEXT,
            url TEXT,
            platform_id TEXT,
            created_at TEXT
        );",
    )
    .expect("failed to create news_items");
    for (title, platform, created_at) in rows {
        conn.execute(
            "INSERT INTO news_items (title, url, platform_id, created_at)
             VALUES (?1, 'https://example.com/' || ?1, ?2, ?3)",
            [title, platform, created_at],
        )
        .expect("failed to insert news row");
    }
    conn
}

pub fn seed_analysis(conn: &Connection) {
    conn.execute_batch(
        "CREATE TABLE ai_analysis (
            id INTEGER PRIMARY KEY,
            topic TEXT,
            sentiment REAL,
            created_at TEXT
        );
        INSERT INTO ai_analysis (topic, sentiment, created_at) VALUES
            ('energy', 0.5, '2024-03-01 10:00:00'),
            ('markets', -0.25, '2024-03-02 10:00:00');",
    )
    .expect("failed to seed ai_analysis");
}
