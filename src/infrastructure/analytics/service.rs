//! Analytics notifier trait and error types.

use async_trait::async_trait;

use crate::domain::pageview_event::PageviewEvent;

/// Errors that can occur while delivering an analytics event.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Analytics request failed: {0}")]
    Request(String),

    #[error("Analytics endpoint rejected event with status {0}")]
    Rejected(u16),
}

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Sink for pageview events.
///
/// Callers never await delivery on the request path: the redirect resolver
/// spawns [`AnalyticsNotifier::emit`] on a detached task and only logs the
/// outcome.
///
/// # Implementations
///
/// - [`crate::infrastructure::analytics::HttpAnalyticsNotifier`] - posts events to an HTTP collector
/// - [`crate::infrastructure::analytics::NullNotifier`] - drops events when analytics is disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsNotifier: Send + Sync {
    /// Delivers one pageview event.
    async fn emit(&self, event: PageviewEvent) -> AnalyticsResult<()>;

    /// Short description used by the health endpoint.
    fn describe(&self) -> String;
}
