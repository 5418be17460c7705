// SPDX-License-Identifier: Apache-2.0

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use levelboard_server::{build_router, AppState, HtmlShells, ReportStore};
use serde_json::Value;
use tower::util::ServiceExt;

fn seeded_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("demo.json"),
        r#"{
            "repoInfo": {
                "data": {"name": "demo", "createdDate": "2024-03-01", "totalFiles": 12},
                "commits": [
                    {"commits": 3, "total_hours": 5.0, "total_files_modified": 7, "loc": 210},
                    {"commits": 2, "total_hours": 1.5, "total_files_modified": 4, "loc": 90}
                ]
            },
            "elements": [
                {"class": "list_comprehension", "level": "B1", "instances": 4},
                {"class": "decorator", "level": "C1", "instances": 2}
            ]
        }"#,
    )
    .expect("write report");
    std::fs::write(
        dir.path().join("scratch.json"),
        r#"{"dirInfo": {"data": {"name": "scratch"}}, "elements": []}"#,
    )
    .expect("write report");

    let state = AppState::new(ReportStore::new(dir.path()), HtmlShells::default());
    (dir, build_router(state))
}

async fn get(app: &Router, path: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn healthz_is_ok() {
    let (_dir, app) = seeded_app();
    let (status, body) = get(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn results_list_carries_every_report_header() {
    let (_dir, app) = seeded_app();
    let (status, body) = get(&app, "/api/results").await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).expect("json body");
    let list = parsed.as_array().expect("array body");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "demo");
    assert_eq!(list[0]["data"]["name"], "demo");
    assert_eq!(list[1]["name"], "scratch");
    assert!(list[1].get("commits").is_none());
}

#[tokio::test]
async fn single_result_returns_full_report() {
    let (_dir, app) = seeded_app();
    let (status, body) = get(&app, "/api/results/demo").await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(parsed["repoInfo"]["data"]["name"], "demo");
    assert_eq!(parsed["elements"].as_array().map(Vec::len), Some(2));
    assert_eq!(parsed["elements"][0]["level"], "B1");
}

#[tokio::test]
async fn missing_report_is_a_json_404() {
    let (_dir, app) = seeded_app();
    let (status, body) = get(&app, "/api/results/absent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let parsed: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(parsed["error"]["code"], "not_found");
    assert_eq!(parsed["error"]["details"]["report"], "absent");
}

#[tokio::test]
async fn traversal_name_is_rejected() {
    let (_dir, app) = seeded_app();
    let (status, body) = get(&app, "/api/results/..").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let parsed: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(parsed["error"]["code"], "invalid_param");
}

#[tokio::test]
async fn home_page_links_every_report() {
    let (_dir, app) = seeded_app();
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<a href=\"/demo\">demo</a>"));
    assert!(body.contains("<a href=\"/scratch\">scratch</a>"));
}

#[tokio::test]
async fn repo_page_substitutes_every_token() {
    let (_dir, app) = seeded_app();
    let (status, body) = get(&app, "/demo").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("PH_"), "unsubstituted token in: {body}");
    assert!(body.contains("<h1>demo</h1>"));
    assert!(body.contains("2024-03-01"));
    assert!(body.contains("6.5"));
}

#[tokio::test]
async fn repo_page_for_missing_report_is_404() {
    let (_dir, app) = seeded_app();
    let (status, _body) = get(&app, "/absent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
