//! HTTP analytics notifier.

use super::service::{AnalyticsError, AnalyticsNotifier, AnalyticsResult};
use crate::domain::pageview_event::PageviewEvent;
use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::Duration;
use tracing::debug;

/// Posts pageview events as JSON to an analytics collector.
///
/// The body follows the event API of Plausible-style collectors:
/// `{"name": "pageview", "url": ..., "referrer": ..., "domain": ...}`. The
/// visitor's user agent is forwarded in the `User-Agent` header, since
/// collectors derive device information from it.
pub struct HttpAnalyticsNotifier {
    client: Client,
    endpoint: String,
    site_domain: Option<String>,
}

impl HttpAnalyticsNotifier {
    /// Builds a notifier for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Request`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        site_domain: Option<String>,
        timeout: Duration,
    ) -> AnalyticsResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalyticsError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            site_domain,
        })
    }
}

#[async_trait]
impl AnalyticsNotifier for HttpAnalyticsNotifier {
    async fn emit(&self, event: PageviewEvent) -> AnalyticsResult<()> {
        let event = event.with_domain(self.site_domain.clone());

        let mut request = self.client.post(&self.endpoint).json(&event);
        if let Some(user_agent) = &event.user_agent {
            request = request.header(header::USER_AGENT, user_agent);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AnalyticsError::Request(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %event.url, "Analytics response");

        if !status.is_success() {
            return Err(AnalyticsError::Rejected(status.as_u16()));
        }

        Ok(())
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
