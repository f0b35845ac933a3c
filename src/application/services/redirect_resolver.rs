//! Redirect resolution with fire-and-forget pageview notification.

use std::sync::Arc;

use crate::application::services::registry::Registry;
use crate::domain::pageview_event::PageviewContext;
use crate::domain::repositories::MappingStore;
use crate::error::{AppError, MSG_ID_MISSING};
use crate::infrastructure::analytics::AnalyticsNotifier;
use serde_json::json;
use tracing::{debug, warn};

/// Resolves short ids to long URLs and reports each hit to analytics.
///
/// Notification runs on a detached task: the caller gets the long URL as
/// soon as the lookup completes, and a failing or slow collector only
/// produces a warning in the logs.
pub struct RedirectResolver<S: ?Sized> {
    registry: Arc<Registry<S>>,
    notifier: Arc<dyn AnalyticsNotifier>,
}

impl<S: MappingStore + ?Sized> RedirectResolver<S> {
    pub fn new(registry: Arc<Registry<S>>, notifier: Arc<dyn AnalyticsNotifier>) -> Self {
        Self { registry, notifier }
    }

    /// Returns the long URL registered for `short_id`.
    ///
    /// On success exactly one pageview built from `context` is handed to the
    /// notifier. Nothing is emitted on failure.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if `short_id` is empty.
    /// Returns [`AppError::NotFound`] if no mapping has this short id.
    pub async fn resolve(
        &self,
        short_id: &str,
        context: PageviewContext,
    ) -> Result<String, AppError> {
        if short_id.trim().is_empty() {
            return Err(AppError::invalid_input(MSG_ID_MISSING, json!({})));
        }

        let mapping = self.registry.get(short_id).await?;
        debug!(short_id, long_url = %mapping.long_url, "Redirection resolved");

        let notifier = self.notifier.clone();
        let event = context.into_event();
        tokio::spawn(async move {
            if let Err(e) = notifier.emit(event).await {
                warn!(error = %e, collector = %notifier.describe(), "Failed to notify analytics");
            }
        });

        Ok(mapping.long_url)
    }
}
