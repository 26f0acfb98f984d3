//! Full server over a real socket.

use std::sync::Arc;
use std::time::Duration;

use paste_share::config::{AppConfig, StorageBackend};
use paste_share::http::{AppState, HttpServer};
use paste_share::lifecycle::Shutdown;
use paste_share::storage::SqliteStore;

#[tokio::test]
async fn test_create_and_read_over_http() {
    let data = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Sqlite;
    config.storage.database_path = data.path().join("pastes.db").to_string_lossy().into_owned();
    config.security.app_secret = "e2e-secret".into();

    let store = SqliteStore::open(&config.storage.database_path).await.unwrap();
    let state = AppState::new(&config, Arc::new(store));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, state);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let base = format!("http://{addr}");

    let res = client
        .post(format!("{base}/api/p"))
        .form(&[("content", "hello over the wire"), ("ttl", "15m")])
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let raw = client
        .get(format!("{base}/api/raw/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(raw.status(), 200);
    assert!(raw.headers().contains_key("x-request-id"));
    assert_eq!(raw.text().await.unwrap(), "hello over the wire");

    drop(client);
    shutdown.trigger();
    handle.await.unwrap().unwrap();
}
