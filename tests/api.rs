//! Public paste API tests.

use axum::http::{header, StatusCode};
use paste_share::paste::{unix_now, PasswordHash};
use paste_share::storage::{Paste, PasteStore};

mod common;
use common::*;

fn stored(id: &str) -> Paste {
    Paste {
        id: id.into(),
        content: "stored content".into(),
        syntax: "rust".into(),
        allow_edit: false,
        password: None,
        created_at: unix_now(),
        expires_at: None,
    }
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let res = send(&app.public, get("/_health")).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_and_fetch() {
    let app = test_app();
    let id = create(&app, &[("content", "  fn main() {}\n  ")]).await;
    assert_eq!(id.len(), 8);

    let res = send(&app.public, get(&format!("/api/p/{id}"))).await;
    assert_eq!(res.status, StatusCode::OK);
    let json = res.json();
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["content"], "fn main() {}");
    assert_eq!(json["syntax"], "auto");
    assert_eq!(json["allow_edit"], false);
    assert_eq!(json["expires_at"], 0);
}

#[tokio::test]
async fn test_create_with_ttl_and_syntax() {
    let app = test_app();
    let before = unix_now();
    let id = create(
        &app,
        &[("content", "select 1"), ("syntax", "sql"), ("ttl", "2h")],
    )
    .await;

    let json = send(&app.public, get(&format!("/api/p/{id}"))).await.json();
    assert_eq!(json["syntax"], "sql");
    let expires = json["expires_at"].as_i64().unwrap();
    assert!(expires >= before + 7200 && expires <= unix_now() + 7200);
}

#[tokio::test]
async fn test_create_rejects_bad_input() {
    let app = test_app_with(|c| c.limits.max_content_bytes = 16);

    let res = send(&app.public, post_form("/api/p", &[("content", "   ")])).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, "invalid content");

    let res = send(&app.public, post_form("/api/p", &[("content", "x".repeat(17).as_str())])).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, "invalid content");

    let res = send(
        &app.public,
        post_form("/api/p", &[("content", "ok"), ("ttl", "forever")]),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, "invalid ttl");

    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_create_rejects_ttl_past_representable_time() {
    let app = test_app();
    for ttl in ["200000000000000d", "106751991167300d"] {
        let res = send(
            &app.public,
            post_form("/api/p", &[("content", "ok"), ("ttl", ttl)]),
        )
        .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{ttl}");
        assert_eq!(res.body, "invalid ttl");
    }
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_body_limit() {
    let app = test_app_with(|c| c.limits.max_content_bytes = 16);
    let res = send(
        &app.public,
        post_form("/api/p", &[("content", "x".repeat(4096).as_str())]),
    )
    .await;
    assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_non_form_body_rejected() {
    let app = test_app();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/p")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(r#"{"content":"x"}"#))
        .unwrap();
    let res = send(&app.public, request).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, "bad form");
}

#[tokio::test]
async fn test_missing_and_expired() {
    let app = test_app();
    let res = send(&app.public, get("/api/p/nothere")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, "not found");

    let mut old = stored("expired1");
    old.expires_at = Some(unix_now() - 60);
    app.store.insert(&old).await.unwrap();

    for uri in ["/api/p/expired1", "/api/raw/expired1"] {
        let res = send(&app.public, get(uri)).await;
        assert_eq!(res.status, StatusCode::GONE, "{uri}");
        assert_eq!(res.body, "gone");
    }
}

#[tokio::test]
async fn test_raw_content() {
    let app = test_app();
    app.store.insert(&stored("raw12345")).await.unwrap();

    let res = send(&app.public, get("/api/raw/raw12345")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.headers.get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(res.body, "stored content");
}

#[tokio::test]
async fn test_password_flow() {
    let app = test_app();
    let id = create(&app, &[("content", "secret"), ("password", "pw")]).await;
    let paste_uri = format!("/api/p/{id}");
    let auth_uri = format!("/api/p/{id}/auth");

    let res = send(&app.public, get(&paste_uri)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    let res = send(&app.public, get(&format!("/api/raw/{id}"))).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = send(&app.public, post_form(&auth_uri, &[("password", "wrong")])).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(res.cookie().is_none());

    let res = send(&app.public, post_form(&auth_uri, &[("password", "pw")])).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let set_cookie = res.headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=86400"));
    let cookie = res.cookie().unwrap();
    assert!(cookie.starts_with(&format!("auth_{id}=")));

    let res = send(&app.public, get_with_cookie(&paste_uri, &cookie)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["content"], "secret");

    let forged = format!("auth_{id}=AAAA");
    let res = send(&app.public, get_with_cookie(&paste_uri, &forged)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cookie_does_not_transfer_between_pastes() {
    let app = test_app();
    let first = create(&app, &[("content", "one"), ("password", "pw")]).await;
    let second = create(&app, &[("content", "two"), ("password", "pw")]).await;

    let res = send(
        &app.public,
        post_form(&format!("/api/p/{first}/auth"), &[("password", "pw")]),
    )
    .await;
    let token = res.cookie().unwrap();
    let value = token.split_once('=').unwrap().1;

    let reused = format!("auth_{second}={value}");
    let res = send(&app.public, get_with_cookie(&format!("/api/p/{second}"), &reused)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_without_password() {
    let app = test_app();
    let id = create(&app, &[("content", "open")]).await;
    let res = send(
        &app.public,
        post_form(&format!("/api/p/{id}/auth"), &[("password", "pw")]),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, "no password");

    let res = send(
        &app.public,
        post_form("/api/p/missing1/auth", &[("password", "pw")]),
    )
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_rules() {
    let app = test_app();

    let locked = create(&app, &[("content", "v1")]).await;
    let res = send(
        &app.public,
        post_form(&format!("/api/p/{locked}"), &[("content", "v2")]),
    )
    .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body, "forbidden");

    let open = create(&app, &[("content", "v1"), ("allow_edit", "on")]).await;
    let uri = format!("/api/p/{open}");
    let res = send(&app.public, post_form(&uri, &[("content", "")])).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = send(&app.public, post_form(&uri, &[("content", "v2")])).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let json = send(&app.public, get(&uri)).await.json();
    assert_eq!(json["content"], "v2");
    assert_eq!(json["allow_edit"], true);

    let res = send(&app.public, post_form("/api/p/missing1", &[("content", "x")])).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_protected_requires_cookie() {
    let app = test_app();
    let mut paste = stored("guarded1");
    paste.allow_edit = true;
    paste.password = Some(PasswordHash::new("pw"));
    app.store.insert(&paste).await.unwrap();

    let res = send(
        &app.public,
        post_form("/api/p/guarded1", &[("content", "changed")]),
    )
    .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let cookie = send(
        &app.public,
        post_form("/api/p/guarded1/auth", &[("password", "pw")]),
    )
    .await
    .cookie()
    .unwrap();
    let res = send(
        &app.public,
        post_form_with_cookie("/api/p/guarded1", &[("content", "changed")], Some(&cookie)),
    )
    .await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(
        app.store.get("guarded1").await.unwrap().unwrap().content,
        "changed"
    );
}

#[tokio::test]
async fn test_request_id() {
    let app = test_app();
    let res = send(&app.public, get("/_health")).await;
    let generated = res.headers.get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let request = axum::http::Request::builder()
        .uri("/_health")
        .header("x-request-id", "client-chosen")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = send(&app.public, request).await;
    assert_eq!(res.headers.get("x-request-id").unwrap(), "client-chosen");
}
