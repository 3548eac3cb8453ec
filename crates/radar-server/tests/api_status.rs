mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{build_app, get_json, seed_analysis, seed_news};
use radar_db::SnapshotResolver;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn root_reports_identity_and_resolved_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    seed_news(dir.path(), "2024-03-01.db", &[]);
    seed_news(dir.path(), "2024-03-02.db", &[]);

    let expected = SnapshotResolver::new(dir.path())
        .resolve()
        .map(|p| p.display().to_string());

    let (status, body) = get_json(build_app(dir.path()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
    assert_eq!(body["service"], "TrendRadar API Wrapper");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["db"], json!(expected));
}

#[tokio::test]
async fn root_without_snapshot_reports_null_db() {
    let dir = tempfile::tempdir().unwrap();
    let (_, body) = get_json(build_app(dir.path()), "/").await;
    assert_eq!(body["db"], json!(null));
}

#[tokio::test]
async fn health_reports_db_missing_for_absent_or_empty_directory() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body) = get_json(build_app(&dir.path().join("nope")), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "db_missing", "db": null}));

    let (_, body) = get_json(build_app(dir.path()), "/api/health").await;
    assert_eq!(body, json!({"status": "db_missing", "db": null}));
}

#[tokio::test]
async fn health_reports_online_with_path() {
    let dir = tempfile::tempdir().unwrap();
    seed_news(dir.path(), "2024-03-02.db", &[]);

    let (_, body) = get_json(build_app(dir.path()), "/api/health").await;
    assert_eq!(body["status"], "online");
    assert_eq!(
        body["db"],
        json!(dir.path().join("2024-03-02.db").display().to_string())
    );
}

#[tokio::test]
async fn analysis_returns_opaque_rows_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let conn = seed_news(dir.path(), "2024-03-02.db", &[]);
    seed_analysis(&conn);
    drop(conn);

    let (status, body) = get_json(build_app(dir.path()), "/api/analysis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": 2, "topic": "markets", "sentiment": -0.25, "created_at": "2024-03-02 10:00:00"},
            {"id": 1, "topic": "energy", "sentiment": 0.5, "created_at": "2024-03-01 10:00:00"}
        ])
    );

    let (_, body) = get_json(build_app(dir.path()), "/api/analysis?limit=1").await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn analysis_without_table_is_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    seed_news(dir.path(), "2024-03-02.db", &[("a", "weibo", "2024-03-02")]);

    let (status, body) = get_json(build_app(dir.path()), "/api/analysis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn debug_describes_news_only_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    seed_news(
        dir.path(),
        "2024-03-02.db",
        &[
            ("one", "weibo", "2024-03-02 01:00:00"),
            ("two", "zhihu", "2024-03-02 02:00:00"),
            ("three", "weibo", "2024-03-02 03:00:00"),
        ],
    );

    let (status, body) = get_json(build_app(dir.path()), "/api/debug").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["db_path"],
        json!(dir.path().join("2024-03-02.db").display().to_string())
    );
    assert_eq!(body["tables"], json!(["news_items"]));
    assert_eq!(body["counts"], json!({"news_items": 3}));
    assert_eq!(body["schema_news"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["schema_news"][3]["name"], "platform_id");
    assert_eq!(
        body["first_row_news"],
        json!({
            "id": 1,
            "title": "one",
            "url": "https://example.com/one",
            "platform_id": "weibo",
            "created_at": "2024-03-02 01:00:00"
        })
    );
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn debug_without_snapshot_reports_directory_state() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body) = get_json(build_app(&dir.path().join("missing")), "/api/debug").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"error": "No connection", "db_dir_exists": false, "db_files": []})
    );
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_app(dir.path());

    let preflight = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/trends")
                .header(header::ORIGIN, "https://dashboard.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(preflight.status(), StatusCode::OK);
    assert_eq!(
        preflight.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "https://dashboard.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
