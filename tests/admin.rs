//! Admin API tests.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use paste_share::paste::unix_now;
use paste_share::storage::{Paste, PasteStore};

mod common;
use common::*;

fn paste(id: &str, created_at: i64, expires_at: Option<i64>, allow_edit: bool) -> Paste {
    Paste {
        id: id.into(),
        content: "c".into(),
        syntax: "auto".into(),
        allow_edit,
        password: None,
        created_at,
        expires_at,
    }
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_list_newest_first() {
    let app = test_app();
    app.store.insert(&paste("first111", 10, None, false)).await.unwrap();
    app.store.insert(&paste("second22", 20, Some(99), true)).await.unwrap();

    let res = send(&app.admin, get("/admin")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.json(),
        serde_json::json!([
            {"id": "second22", "created": 20, "expires": 99, "allow_edit": true},
            {"id": "first111", "created": 10, "expires": 0, "allow_edit": false},
        ])
    );
}

#[tokio::test]
async fn test_delete() {
    let app = test_app();
    app.store.insert(&paste("doomed11", 1, None, false)).await.unwrap();

    let res = send(&app.admin, post("/admin/delete/doomed11")).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(app.store.is_empty());

    // Deleting twice is not an error
    let res = send(&app.admin, post("/admin/delete/doomed11")).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_purge() {
    let app = test_app();
    let now = unix_now();
    app.store.insert(&paste("expired1", 1, Some(now - 10), false)).await.unwrap();
    app.store.insert(&paste("future11", 2, Some(now + 3600), false)).await.unwrap();
    app.store.insert(&paste("forever1", 3, None, false)).await.unwrap();

    let res = send(&app.admin, post("/admin/purge")).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(app.store.len(), 2);
    assert!(app.store.get("expired1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_bearer_key() {
    let app = test_app_with(|c| c.admin.api_key = Some("s3cret".into()));

    let res = send(&app.admin, get("/admin")).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let wrong = Request::builder()
        .uri("/admin")
        .header(header::AUTHORIZATION, "Bearer nope")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app.admin, wrong).await.status, StatusCode::UNAUTHORIZED);

    let right = Request::builder()
        .uri("/admin")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app.admin, right).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_routes_not_public() {
    let app = test_app();
    let res = send(&app.public, post("/admin/purge")).await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    let res = send(&app.public, get("/admin")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
