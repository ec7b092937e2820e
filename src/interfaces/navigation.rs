use mockall::automock;

/// Client-side route changes requested by the view.
#[automock]
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}
