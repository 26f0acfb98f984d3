//! Single-page application fallback.
//!
//! Every GET that no API route or asset claims is answered with the SPA
//! entry document. The route table decides the status: paths the client
//! router knows get 200, anything else gets 404 with the same document so
//! the client can render its own not-found page.

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;

pub const INDEX_FILE: &str = "index.html";

pub async fn spa_fallback(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let status = match state.routes.resolve(uri.path()) {
        Ok(nav) => {
            tracing::debug!(route = nav.name(), path = %uri.path(), "SPA route");
            StatusCode::OK
        }
        Err(e) => {
            tracing::debug!(error = %e, "Unknown SPA path");
            StatusCode::NOT_FOUND
        }
    };

    let index = state.ui_dir.join(INDEX_FILE);
    match tokio::fs::read(&index).await {
        Ok(document) => (
            status,
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            document,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(path = %index.display(), error = %e, "SPA entry document unavailable");
            (StatusCode::NOT_FOUND, "not found").into_response()
        }
    }
}
