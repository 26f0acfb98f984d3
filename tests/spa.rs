//! SPA fallback and asset serving.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};

mod common;
use common::*;

#[tokio::test]
async fn test_known_client_routes_serve_index() {
    let app = test_app();
    for path in ["/", "/p/abc123", "/docs", "/my-shares", "/docs?tab=api", "/docs/"] {
        let res = send(&app.public, get(path)).await;
        assert_eq!(res.status, StatusCode::OK, "{path}");
        assert_eq!(res.body, INDEX_HTML, "{path}");
        assert_eq!(
            res.headers.get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }
}

#[tokio::test]
async fn test_unknown_client_routes_are_404_with_index() {
    let app = test_app();
    for path in ["/unknown", "/p/", "/p/a/b", "/DOCS"] {
        let res = send(&app.public, get(path)).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(res.body, INDEX_HTML, "{path}");
    }
}

#[tokio::test]
async fn test_fallback_only_answers_reads() {
    let app = test_app();
    let request = Request::builder()
        .method("DELETE")
        .uri("/docs")
        .body(Body::empty())
        .unwrap();
    let res = send(&app.public, request).await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_assets_served_from_dist() {
    let app = test_app();
    let res = send(&app.public, get("/assets/app.js")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, APP_JS);

    let res = send(&app.public, get("/assets/missing.js")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_ui_build() {
    let app = test_app_with(|c| c.ui.dist_dir = "/nonexistent/paste-share-ui".into());
    let res = send(&app.public, get("/docs")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, "not found");
}
