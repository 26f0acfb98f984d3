//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Resolve a requested path to the first matching route
//! - Return matched route plus bound parameters, or explicit NotFound
//!
//! # Design Decisions
//! - Immutable after construction (shared by reference, no locks)
//! - O(n) scan over routes (the table is tiny)
//! - Explicit NotFound rather than a silent default view
//! - Invariants (unique names, single root route) checked in `build`

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::routing::pattern::{strip_query, Params, PathPattern, PatternError};

/// Views of the paste-sharing application.
///
/// The router never renders these; it only hands them back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Home,
    Paste,
    Docs,
    MyShares,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Paste => "paste",
            View::Docs => "docs",
            View::MyShares => "myshares",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route matches path `{path}`")]
    NotFound { path: String },
}

/// Errors detected while building a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),
    #[error("route name `{0}` is registered more than once")]
    DuplicateName(String),
    #[error("expected exactly one route for `/`, found {0}")]
    RootRoute(usize),
}

/// A binding from a path pattern to a named view.
#[derive(Debug, Clone)]
pub struct Route<V = View> {
    pattern: PathPattern,
    name: String,
    view: V,
}

impl<V> Route<V> {
    pub fn new(path: &str, name: impl Into<String>, view: V) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: PathPattern::parse(path)?,
            name: name.into(),
            view,
        })
    }

    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone)]
pub struct NavigationResult<'t, V = View> {
    pub route: &'t Route<V>,
    pub params: Params,
}

impl<'t, V> NavigationResult<'t, V> {
    pub fn name(&self) -> &'t str {
        self.route.name()
    }

    pub fn view(&self) -> &'t V {
        self.route.view()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}

/// Ordered, immutable collection of routes.
#[derive(Debug, Clone)]
pub struct RouteTable<V = View> {
    routes: Vec<Route<V>>,
}

/// The route table of the paste-sharing application.
pub fn app_routes() -> RouteTable {
    RouteTableBuilder::new()
        .route("/", "home", View::Home)
        .route("/p/:id", "paste", View::Paste)
        .route("/docs", "docs", View::Docs)
        .route("/my-shares", "myshares", View::MyShares)
        .build()
        .expect("application route table is valid")
}

impl<V> RouteTable<V> {
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder::new()
    }

    /// Find the first route matching `path`.
    ///
    /// Query string and fragment are ignored. Paths that do not start with
    /// `/` never match.
    pub fn resolve(&self, path: &str) -> Result<NavigationResult<'_, V>, RouteError> {
        let target = strip_query(path);
        self.routes
            .iter()
            .find_map(|route| {
                route
                    .pattern
                    .matches(target)
                    .map(|params| NavigationResult { route, params })
            })
            .ok_or_else(|| RouteError::NotFound {
                path: path.to_string(),
            })
    }

    /// Look a route up by its symbolic name.
    pub fn by_name(&self, name: &str) -> Option<&Route<V>> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn routes(&self) -> &[Route<V>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Collects routes and validates the table invariants on `build`.
#[derive(Debug)]
pub struct RouteTableBuilder<V> {
    entries: Vec<(String, String, V)>,
}

impl<V> RouteTableBuilder<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn route(mut self, path: &str, name: &str, view: V) -> Self {
        self.entries
            .push((path.to_string(), name.to_string(), view));
        self
    }

    pub fn build(self) -> Result<RouteTable<V>, RouteTableError> {
        let mut routes = Vec::with_capacity(self.entries.len());
        let mut names = HashSet::new();

        for (path, name, view) in self.entries {
            if !names.insert(name.clone()) {
                return Err(RouteTableError::DuplicateName(name));
            }
            routes.push(Route::new(&path, name, view)?);
        }

        let roots = routes.iter().filter(|r| r.pattern.is_root()).count();
        if roots != 1 {
            return Err(RouteTableError::RootRoute(roots));
        }

        Ok(RouteTable { routes })
    }
}

impl<V> Default for RouteTableBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
