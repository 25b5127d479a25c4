//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use drivealert::application::identify::PostMatchHook;
use drivealert::domain::entities::driver::{Driver, DriverDocument};
use drivealert::domain::error::DomainError;
use drivealert::domain::ports::driver_store::DriverStore;
use drivealert::domain::values::embedding::FeatureVector;
use drivealert::domain::values::timestamp::TimestampValue;
use drivealert::infrastructure::sqlite::driver_repo::SqliteDriverStore;
use drivealert::DriveAlert;
use std::sync::{Arc, Mutex};

pub fn memory_store() -> Arc<SqliteDriverStore> {
    Arc::new(SqliteDriverStore::open(":memory:").unwrap())
}

pub fn setup() -> (DriveAlert, Arc<SqliteDriverStore>) {
    let store = memory_store();
    (DriveAlert::with_store(store.clone()), store)
}

pub fn driver_doc(user_id: &str, status: &str, embedding: &[f64]) -> DriverDocument {
    DriverDocument {
        id: None,
        user_id: Some(user_id.to_string()),
        fleet_manager_id: Some("fm-100".to_string()),
        first_name: Some("Driver".to_string()),
        last_name: Some(user_id.to_string()),
        email: Some(format!("{}@fleet.example", user_id.to_lowercase())),
        phone: Some("+1-555-0100".to_string()),
        license_number: Some(format!("DL-{user_id}")),
        username: Some(user_id.to_lowercase()),
        account_status: Some(status.to_string()),
        face_embedding: Some(FeatureVector::new(embedding.to_vec()).encode()),
        created_at: TimestampValue::Integer(1_700_000_000),
        updated_at: TimestampValue::Text("2023-11-14T00:00:00Z".to_string()),
        last_login: TimestampValue::Absent,
    }
}

/// Unit basis vector `e_i` in `dim` dimensions.
pub fn basis(dim: usize, i: usize) -> Vec<f64> {
    let mut v = vec![0.0; dim];
    v[i] = 1.0;
    v
}

pub async fn seed(store: &SqliteDriverStore, docs: &[DriverDocument]) {
    for doc in docs {
        store.insert(doc).await.unwrap();
    }
}

/// Store whose reads always fail.
pub struct UnavailableStore;

#[async_trait]
impl DriverStore for UnavailableStore {
    async fn list_active(&self) -> Result<Vec<DriverDocument>, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }

    async fn find_by_user_id(&self, _user_id: &str) -> Result<Option<DriverDocument>, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }

    async fn touch_login(&self, _user_id: &str) -> Result<bool, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }

    async fn insert(&self, _doc: &DriverDocument) -> Result<String, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }
}

/// Reads from a real store but fails every login touch.
pub struct ReadOnlyStore {
    pub inner: Arc<SqliteDriverStore>,
}

#[async_trait]
impl DriverStore for ReadOnlyStore {
    async fn list_active(&self) -> Result<Vec<DriverDocument>, DomainError> {
        self.inner.list_active().await
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<DriverDocument>, DomainError> {
        self.inner.find_by_user_id(user_id).await
    }

    async fn touch_login(&self, _user_id: &str) -> Result<bool, DomainError> {
        Err(DomainError::StoreUnavailable("read-only replica".into()))
    }

    async fn insert(&self, doc: &DriverDocument) -> Result<String, DomainError> {
        self.inner.insert(doc).await
    }
}

/// Hook that records which drivers it was called for.
#[derive(Default)]
pub struct RecordingHook {
    pub seen: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl PostMatchHook for RecordingHook {
    fn name(&self) -> &str {
        "recording"
    }

    async fn after_match(&self, driver: &Driver) -> Result<(), DomainError> {
        self.seen.lock().unwrap().push(driver.user_id.clone());
        if self.fail {
            Err(DomainError::StoreUnavailable("audit sink down".into()))
        } else {
            Ok(())
        }
    }
}
