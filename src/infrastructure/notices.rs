use std::sync::Arc;

use parking_lot::Mutex;

use crate::interfaces::notify::Notifier;

/// Records user-facing notices for the host to display. Cloning shares the
/// same log.
#[derive(Clone, Default)]
pub struct NoticeLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.entries.lock().last().cloned()
    }

    pub fn all(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, message: &str) {
        tracing::info!(notice = message, "user notice");
        self.entries.lock().push(message.to_owned());
    }
}
