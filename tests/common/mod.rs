#![allow(dead_code)]

use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use linkspan::application::services::{ExpiryPolicy, MappingService};
use linkspan::domain::entities::{NewMapping, UrlMapping};
use linkspan::domain::repositories::{MappingRepository, StoreError};
use linkspan::infrastructure::persistence::InMemoryMappingRepository;
use linkspan::routes::{app_router, build_router};
use linkspan::state::AppState;
use linkspan::utils::code_generator::RandomCodeGenerator;
use std::sync::Arc;

/// State backed by a fresh in-memory store, returned alongside the store so
/// tests can seed and inspect it directly.
pub fn create_test_state() -> (AppState, Arc<InMemoryMappingRepository>) {
    let repository = Arc::new(InMemoryMappingRepository::new());
    let service = MappingService::new(
        repository.clone(),
        Arc::new(RandomCodeGenerator::default()),
        ExpiryPolicy::default(),
    );
    (AppState::new(Arc::new(service)), repository)
}

/// State whose store fails every call.
pub fn create_failing_state() -> AppState {
    let service = MappingService::new(
        Arc::new(FailingRepository),
        Arc::new(RandomCodeGenerator::default()),
        ExpiryPolicy::default(),
    );
    AppState::new(Arc::new(service))
}

/// Test server over the full router.
pub fn make_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).unwrap()
}

/// Test server over the router as served, including path normalization.
pub fn make_normalized_server(state: AppState) -> TestServer {
    TestServer::new(ServiceExt::<Request>::into_make_service(app_router(state))).unwrap()
}

pub async fn create_test_mapping(
    repository: &InMemoryMappingRepository,
    code: &str,
    url: &str,
    expires_at: DateTime<Utc>,
) -> UrlMapping {
    repository
        .insert(NewMapping {
            short_code: code.to_string(),
            destination_url: url.to_string(),
            expires_at,
        })
        .await
        .unwrap()
}

struct FailingRepository;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl MappingRepository for FailingRepository {
    async fn insert(&self, _new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        Err(unavailable())
    }

    async fn find_by_code(&self, _short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        Err(unavailable())
    }

    async fn update_destination(
        &self,
        _short_code: &str,
        _destination_url: &str,
    ) -> Result<bool, StoreError> {
        Err(unavailable())
    }

    async fn set_expiry(
        &self,
        _short_code: &str,
        _expires_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        Err(unavailable())
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<u64, StoreError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}
