//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, trace span)
//!     → handlers.rs (paste API) | ServeDir (assets) | spa.rs (fallback)
//!     → error.rs (failure → status + message)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;
pub mod spa;

pub use error::ApiError;
pub use request::X_REQUEST_ID;
pub use server::{build_router, AppState, HttpServer};
