//! Analytics side channel.
//!
//! Provides an [`AnalyticsNotifier`] trait with two implementations:
//! - [`HttpAnalyticsNotifier`] - posts pageview events to an HTTP collector
//! - [`NullNotifier`] - no-op implementation when analytics is disabled

pub mod http_notifier;
pub mod null_notifier;
pub mod service;

pub use http_notifier::HttpAnalyticsNotifier;
pub use null_notifier::NullNotifier;
pub use service::{AnalyticsError, AnalyticsNotifier, AnalyticsResult};

#[cfg(test)]
pub use service::MockAnalyticsNotifier;
