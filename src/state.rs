//! Shared application state.

use std::sync::Arc;

use crate::application::services::{RedirectResolver, Registry};
use crate::domain::repositories::MappingStore;
use crate::infrastructure::analytics::AnalyticsNotifier;

/// State injected into every handler.
///
/// Built once at startup around the configured store and notifier. Cloning
/// is cheap: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry<dyn MappingStore>>,
    pub resolver: Arc<RedirectResolver<dyn MappingStore>>,
    pub notifier: Arc<dyn AnalyticsNotifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn MappingStore>, notifier: Arc<dyn AnalyticsNotifier>) -> Self {
        let registry = Arc::new(Registry::new(store));
        let resolver = Arc::new(RedirectResolver::new(registry.clone(), notifier.clone()));

        Self {
            registry,
            resolver,
            notifier,
        }
    }
}
