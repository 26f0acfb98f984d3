//! Navigation driver.
//!
//! Applies navigation events (link activation, programmatic navigation,
//! back/forward) against a borrowed [`RouteTable`] and resets the viewport
//! to the top after every successful navigation.

use crate::observability::metrics;
use crate::routing::table::{NavigationResult, RouteError, RouteTable};

/// Vertical scroll offset in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPosition {
    pub top: u32,
}

impl ScrollPosition {
    pub const TOP: ScrollPosition = ScrollPosition { top: 0 };
}

/// Host-provided scroll mechanism.
pub trait Viewport {
    fn scroll_to(&mut self, position: ScrollPosition);
    fn position(&self) -> ScrollPosition;
}

/// Viewport that only remembers where it was asked to scroll.
///
/// Used headless and in tests.
#[derive(Debug, Default)]
pub struct RecordingViewport {
    position: ScrollPosition,
    resets: usize,
}

impl RecordingViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user scrolling.
    pub fn scroll_by(&mut self, delta: u32) {
        self.position.top = self.position.top.saturating_add(delta);
    }

    /// Number of times the viewport was reset to the top.
    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl Viewport for RecordingViewport {
    fn scroll_to(&mut self, position: ScrollPosition) {
        if position == ScrollPosition::TOP {
            self.resets += 1;
        }
        self.position = position;
    }

    fn position(&self) -> ScrollPosition {
        self.position
    }
}

/// Drives navigation over a shared route table.
pub struct Navigator<'t, V, P> {
    table: &'t RouteTable<V>,
    viewport: P,
    history: Vec<String>,
    cursor: usize,
}

impl<'t, V, P: Viewport> Navigator<'t, V, P> {
    pub fn new(table: &'t RouteTable<V>, viewport: P) -> Self {
        Self {
            table,
            viewport,
            history: Vec::new(),
            cursor: 0,
        }
    }

    /// Navigate to `path`.
    ///
    /// On success the path becomes the current history entry (forward
    /// entries are discarded) and the viewport is reset to the top. On
    /// failure nothing changes.
    pub fn navigate(&mut self, path: &str) -> Result<NavigationResult<'t, V>, RouteError> {
        let table = self.table;
        let result = table.resolve(path)?;

        if !self.history.is_empty() {
            self.history.truncate(self.cursor + 1);
        }
        self.history.push(path.to_string());
        self.cursor = self.history.len() - 1;

        self.arrive(&result);
        Ok(result)
    }

    /// Go one entry back in history.
    pub fn back(&mut self) -> Option<NavigationResult<'t, V>> {
        if self.cursor == 0 || self.history.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.replay()
    }

    /// Go one entry forward in history.
    pub fn forward(&mut self) -> Option<NavigationResult<'t, V>> {
        if self.cursor + 1 >= self.history.len() {
            return None;
        }
        self.cursor += 1;
        self.replay()
    }

    /// Path currently displayed.
    pub fn current(&self) -> Option<&str> {
        self.history.get(self.cursor).map(String::as_str)
    }

    pub fn viewport(&self) -> &P {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut P {
        &mut self.viewport
    }

    // History only ever holds paths that resolved against this table.
    fn replay(&mut self) -> Option<NavigationResult<'t, V>> {
        let table = self.table;
        let result = table.resolve(&self.history[self.cursor]).ok()?;
        self.arrive(&result);
        Some(result)
    }

    fn arrive(&mut self, result: &NavigationResult<'t, V>) {
        self.viewport.scroll_to(ScrollPosition::TOP);
        metrics::record_navigation(result.name());
        tracing::debug!(
            route = result.name(),
            path = self.current().unwrap_or_default(),
            "Navigated"
        );
    }
}
