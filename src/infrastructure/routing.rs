use std::sync::Arc;

use parking_lot::Mutex;

use crate::interfaces::navigation::Navigator;

/// In-memory route stack shared between the view and its host, in the style
/// of a client-side router history. Cloning shares the same stack.
#[derive(Clone, Default)]
pub struct RouteHistory {
    stack: Arc<Mutex<Vec<String>>>,
}

impl RouteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.stack.lock().last().cloned()
    }

    pub fn routes(&self) -> Vec<String> {
        self.stack.lock().clone()
    }
}

impl Navigator for RouteHistory {
    fn navigate(&self, route: &str) {
        tracing::info!(route, "navigating");
        self.stack.lock().push(route.to_owned());
    }
}
