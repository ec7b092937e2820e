use mockall::automock;

/// Blocking, user-facing notices (the `alert()` of the original page).
#[automock]
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
