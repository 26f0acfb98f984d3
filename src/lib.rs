//! Paste sharing service.
//!
//! Serves the paste API, the admin API and the single-page application,
//! whose client-side route table lives in [`routing`].

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod paste;
pub mod routing;
pub mod storage;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{app_routes, RouteTable};
