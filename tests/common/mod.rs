//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use paste_share::admin::setup_admin_router;
use paste_share::config::{AppConfig, StorageBackend};
use paste_share::http::{build_router, AppState};
use paste_share::storage::MemoryStore;

pub const INDEX_HTML: &str = "<!doctype html><div id=\"app\"></div>";
pub const APP_JS: &str = "console.log('app')";

/// Public and admin routers over one in-memory store and a temporary UI dir.
pub struct TestApp {
    pub public: Router,
    pub admin: Router,
    pub store: MemoryStore,
    pub config: AppConfig,
    _ui: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response is JSON")
    }

    /// `name=value` part of the first Set-Cookie header.
    pub fn cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)?
            .to_str()
            .ok()?
            .split(';')
            .next()
            .map(str::to_string)
    }
}

pub fn test_app() -> TestApp {
    test_app_with(|_| {})
}

pub fn test_app_with(customize: impl FnOnce(&mut AppConfig)) -> TestApp {
    let ui = tempfile::tempdir().unwrap();
    std::fs::write(ui.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::create_dir(ui.path().join("assets")).unwrap();
    std::fs::write(ui.path().join("assets").join("app.js"), APP_JS).unwrap();

    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Memory;
    config.ui.dist_dir = ui.path().to_string_lossy().into_owned();
    config.security.app_secret = "test-secret".into();
    customize(&mut config);

    let store = MemoryStore::new();
    let state = AppState::new(&config, Arc::new(store.clone()));

    TestApp {
        public: build_router(&config, state.clone()),
        admin: setup_admin_router(state),
        store,
        config,
        _ui: ui,
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    post_form_with_cookie(uri, fields, None)
}

pub fn post_form_with_cookie(
    uri: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::CONTENT_LENGTH, body.len());
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

/// Create a paste through the API and return its id.
pub async fn create(app: &TestApp, fields: &[(&str, &str)]) -> String {
    let res = send(&app.public, post_form("/api/p", fields)).await;
    assert_eq!(res.status, StatusCode::OK, "create failed: {}", res.body);
    res.json()["id"].as_str().unwrap().to_string()
}
