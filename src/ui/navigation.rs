//! Navigation boundary for callout activation.

/// Opens a developer's profile screen.
pub trait Navigator: Send {
    fn navigate(&mut self, developer_username: &str);
}

/// Navigator that only records the intent in the trace.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&mut self, developer_username: &str) {
        tracing::info!(developer_username = %developer_username, "navigate to profile");
    }
}
