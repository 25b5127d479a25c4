use crate::domain::entities::driver::{Driver, DriverDocument, NormalizedDriver};
use crate::domain::error::DomainError;
use crate::domain::ports::driver_store::DriverStore;
use log::warn;
use std::sync::Arc;

/// Runs every document through validation, dropping (and logging) the ones
/// that do not form a complete driver record.
pub fn validate_documents(documents: Vec<DriverDocument>) -> Vec<Driver> {
    documents
        .into_iter()
        .filter_map(|doc| match Driver::try_from(doc) {
            Ok(driver) => Some(driver),
            Err(e) => {
                warn!("skipping malformed record: {e}");
                None
            }
        })
        .collect()
}

/// Thin store delegations: listing, lookup, login touch and bulk import.
pub struct DriversUseCase {
    store: Arc<dyn DriverStore>,
}

impl DriversUseCase {
    pub fn new(store: Arc<dyn DriverStore>) -> Self {
        Self { store }
    }

    pub async fn list_active(&self) -> Result<Vec<NormalizedDriver>, DomainError> {
        let documents = self.store.list_active().await?;
        Ok(validate_documents(documents)
            .iter()
            .map(Driver::normalize)
            .collect())
    }

    pub async fn get(&self, user_id: &str) -> Result<NormalizedDriver, DomainError> {
        let doc = self
            .store
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("driver {user_id}")))?;
        let driver = Driver::try_from(doc)?;
        Ok(driver.normalize())
    }

    pub async fn touch_login(&self, user_id: &str) -> Result<bool, DomainError> {
        self.store.touch_login(user_id).await
    }

    /// Inserts documents in order and returns their ids. Stops at the first
    /// store failure.
    pub async fn import(&self, documents: &[DriverDocument]) -> Result<Vec<String>, DomainError> {
        let mut ids = Vec::with_capacity(documents.len());
        for doc in documents {
            ids.push(self.store.insert(doc).await?);
        }
        Ok(ids)
    }

    /// Counts the same population `list_active` returns.
    pub async fn count_active(&self) -> Result<usize, DomainError> {
        let documents = self.store.list_active().await?;
        Ok(validate_documents(documents).len())
    }
}
