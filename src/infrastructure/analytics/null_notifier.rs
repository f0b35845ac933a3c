//! No-op analytics notifier for disabled analytics.

use super::service::{AnalyticsNotifier, AnalyticsResult};
use crate::domain::pageview_event::PageviewEvent;
use async_trait::async_trait;
use tracing::debug;

/// A notifier that discards every event.
///
/// Used when `ANALYTICS_URL` is empty and in tests that do not inspect
/// analytics traffic.
pub struct NullNotifier;

impl NullNotifier {
    /// Creates a new NullNotifier instance.
    pub fn new() -> Self {
        debug!("Using NullNotifier (analytics disabled)");
        Self
    }
}

impl Default for NullNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsNotifier for NullNotifier {
    async fn emit(&self, _event: PageviewEvent) -> AnalyticsResult<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        "disabled".to_string()
    }
}
