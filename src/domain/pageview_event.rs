//! Pageview event model for analytics notification.

use serde::Serialize;

/// Event name sent for every successful redirect.
pub const PAGEVIEW: &str = "pageview";

/// A pageview recorded when a short id resolves.
///
/// Built by the redirect resolver and handed to the analytics notifier on a
/// detached task, so the redirect response never waits for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageviewEvent {
    pub name: String,
    /// Fully-qualified URL of the redirect request.
    pub url: String,
    #[serde(skip)]
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    /// Site the event is attributed to, when analytics is multi-site.
    pub domain: Option<String>,
}

impl PageviewEvent {
    /// Creates a pageview for the given request URL.
    pub fn new(url: String, user_agent: Option<String>, referrer: Option<String>) -> Self {
        Self {
            name: PAGEVIEW.to_string(),
            url,
            user_agent,
            referrer,
            domain: None,
        }
    }

    /// Attributes the event to an analytics site.
    pub fn with_domain(mut self, domain: Option<String>) -> Self {
        self.domain = domain;
        self
    }
}

/// Request metadata the redirect handler passes to the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageviewContext {
    pub url: String,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl PageviewContext {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn into_event(self) -> PageviewEvent {
        PageviewEvent::new(self.url, self.user_agent, self.referrer)
    }
}
