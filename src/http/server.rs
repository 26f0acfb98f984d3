//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, timeout, metrics)
//! - Serve the built SPA and its assets
//! - Bind server to listener with graceful shutdown

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, MatchedPath},
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::{AppConfig, LimitsConfig};
use crate::http::handlers::{auth_paste, create_paste, get_paste, get_raw, health, update_paste};
use crate::http::request::{make_span, propagate_request_id_layer, set_request_id_layer};
use crate::http::spa::spa_fallback;
use crate::observability::metrics;
use crate::paste::AuthSigner;
use crate::routing::{app_routes, RouteTable};
use crate::storage::PasteStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PasteStore>,
    pub routes: Arc<RouteTable>,
    pub signer: AuthSigner,
    pub limits: LimitsConfig,
    pub ui_dir: PathBuf,
    pub cookie_max_age_secs: i64,
    pub admin_key: Option<String>,
}

impl AppState {
    pub fn new(config: &AppConfig, store: Arc<dyn PasteStore>) -> Self {
        Self {
            store,
            routes: Arc::new(app_routes()),
            signer: AuthSigner::new(&config.security.app_secret),
            limits: config.limits.clone(),
            ui_dir: PathBuf::from(&config.ui.dist_dir),
            cookie_max_age_secs: config.security.auth_cookie_max_age_secs,
            admin_key: config.admin.api_key.clone(),
        }
    }
}

/// HTTP server for the public API and the SPA.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &AppConfig, state: AppState) -> Self {
        Self {
            router: build_router(config, state),
        }
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        serve(listener, self.router, shutdown, "public").await
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &AppConfig, state: AppState) -> Router {
    let assets = ServeDir::new(state.ui_dir.join("assets"));

    let api = Router::new()
        .route("/_health", get(health))
        .route("/api/p", post(create_paste))
        .route("/api/p/{id}", get(get_paste).post(update_paste))
        .route("/api/p/{id}/auth", post(auth_paste))
        .route("/api/raw/{id}", get(get_raw))
        .route_layer(middleware::from_fn(track_metrics));

    api.nest_service("/assets", assets)
        .fallback(spa_fallback)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(propagate_request_id_layer())
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes()))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
}

async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    metrics::record_request(endpoint, response.status().as_u16(), start);
    response
}

/// Serve `router` on `listener` until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    mut shutdown: broadcast::Receiver<()>,
    name: &'static str,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(server = name, address = %addr, "HTTP server starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;

    tracing::info!(server = name, "HTTP server stopped");
    Ok(())
}
