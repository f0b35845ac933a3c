#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use url_redirector::domain::entities::{Mapping, MappingPatch};
use url_redirector::domain::pageview_event::PageviewEvent;
use url_redirector::domain::repositories::{MappingFilter, MappingStore, StoreError};
use url_redirector::infrastructure::analytics::{
    AnalyticsError, AnalyticsNotifier, AnalyticsResult,
};
use url_redirector::infrastructure::persistence::InMemoryMappingStore;
use url_redirector::routes::router;
use url_redirector::state::AppState;

/// Notifier forwarding every event to a channel the test can inspect.
pub struct RecordingNotifier {
    tx: mpsc::UnboundedSender<PageviewEvent>,
    fail: bool,
}

#[async_trait]
impl AnalyticsNotifier for RecordingNotifier {
    async fn emit(&self, event: PageviewEvent) -> AnalyticsResult<()> {
        let _ = self.tx.send(event);
        if self.fail {
            Err(AnalyticsError::Rejected(503))
        } else {
            Ok(())
        }
    }

    fn describe(&self) -> String {
        "recording".to_string()
    }
}

/// Store whose every call fails as if the database were down.
pub struct UnavailableStore;

#[async_trait]
impl MappingStore for UnavailableStore {
    async fn find_many(&self, _filter: &MappingFilter) -> Result<Vec<Mapping>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_one(&self, _filter: &MappingFilter) -> Result<Option<Mapping>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn insert(&self, _mapping: Mapping) -> Result<Mapping, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn update_one(
        &self,
        _filter: &MappingFilter,
        _patch: MappingPatch,
    ) -> Result<Mapping, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete_one(&self, _filter: &MappingFilter) -> Result<Mapping, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub fn create_test_state_with(
    store: Arc<dyn MappingStore>,
    fail_notifications: bool,
) -> (AppState, mpsc::UnboundedReceiver<PageviewEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let notifier = Arc::new(RecordingNotifier {
        tx,
        fail: fail_notifications,
    });

    (AppState::new(store, notifier), rx)
}

pub fn create_test_state() -> (AppState, mpsc::UnboundedReceiver<PageviewEvent>) {
    create_test_state_with(Arc::new(InMemoryMappingStore::new()), false)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state, true)).unwrap()
}

pub async fn create_test_mapping(state: &AppState, short_id: &str, long_url: &str) -> Mapping {
    state
        .registry
        .store()
        .insert(Mapping::new(short_id, long_url))
        .await
        .unwrap()
}

/// Waits for the next pageview, failing the test after one second.
pub async fn next_pageview(rx: &mut mpsc::UnboundedReceiver<PageviewEvent>) -> PageviewEvent {
    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("no pageview emitted within 1s")
        .expect("notifier dropped")
}
