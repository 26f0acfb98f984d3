//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation event (link, programmatic call, back/forward)
//!     → navigator.rs (history, scroll reset)
//!     → table.rs (first matching route)
//!     → pattern.rs (segment comparison, parameter binding)
//!     → Return: NavigationResult or NotFound
//!
//! Route Compilation (at startup):
//!     (path, name, view)[]
//!     → Parse patterns
//!     → Check unique names and single root route
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)
//! - The server consults the same table for its SPA fallback

pub mod navigator;
pub mod pattern;
pub mod table;

pub use navigator::{Navigator, RecordingViewport, ScrollPosition, Viewport};
pub use pattern::{Params, PathPattern, PatternError};
pub use table::{
    app_routes, NavigationResult, Route, RouteError, RouteTable, RouteTableBuilder,
    RouteTableError, View,
};
