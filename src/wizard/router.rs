//! Router surface consumed by the wizard, plus an in-memory implementation.

use super::route::RouteToken;

/// Minimal navigation history the wizard drives
pub trait Router {
    /// Navigate to `route`, adding a history entry
    fn push(&mut self, route: RouteToken);
    /// Step back one history entry
    fn go_back(&mut self);
    /// Replace the current history entry
    fn replace(&mut self, route: RouteToken);
    /// Current location, if any
    fn location(&self) -> Option<&RouteToken>;
}

/// History kept in memory only, never reflected in a visible address
#[derive(Debug, Clone, Default)]
pub struct MemoryRouter {
    entries: Vec<RouteToken>,
    index: usize,
}

impl MemoryRouter {
    pub fn new(initial: RouteToken) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }
}

impl Router for MemoryRouter {
    fn push(&mut self, route: RouteToken) {
        if self.entries.is_empty() {
            self.entries.push(route);
            self.index = 0;
            return;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(route);
        self.index = self.entries.len() - 1;
    }

    fn go_back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    fn replace(&mut self, route: RouteToken) {
        match self.entries.get_mut(self.index) {
            Some(current) => *current = route,
            None => self.entries.push(route),
        }
    }

    fn location(&self) -> Option<&RouteToken> {
        self.entries.get(self.index)
    }
}
