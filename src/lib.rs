pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::drivers::DriversUseCase;
use crate::application::identify::{AuthResult, IdentifyUseCase, PostMatchHook};
use crate::config::Config;
use crate::domain::entities::driver::{DriverDocument, NormalizedDriver};
use crate::domain::error::DomainError;
use crate::domain::ports::driver_store::DriverStore;
use crate::domain::values::embedding::FeatureVector;
use crate::domain::values::timestamp;
use crate::infrastructure::sqlite::driver_repo::SqliteDriverStore;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub success: bool,
    pub data: String,
    pub active_drivers: usize,
    pub timestamp: i64,
}

pub struct DriveAlert {
    identify_uc: IdentifyUseCase,
    drivers_uc: DriversUseCase,
}

impl DriveAlert {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let store = SqliteDriverStore::open(&config.db_path)?;
        Ok(Self::with_store(Arc::new(store)))
    }

    pub fn with_store(store: Arc<dyn DriverStore>) -> Self {
        Self {
            identify_uc: IdentifyUseCase::new(store.clone()),
            drivers_uc: DriversUseCase::new(store),
        }
    }

    /// Replaces the default login-touch hook with a custom set.
    pub fn with_hooks(store: Arc<dyn DriverStore>, hooks: Vec<Arc<dyn PostMatchHook>>) -> Self {
        Self {
            identify_uc: IdentifyUseCase::with_hooks(store.clone(), hooks),
            drivers_uc: DriversUseCase::new(store),
        }
    }

    // Delegating methods
    pub async fn identify(&self, probe: &FeatureVector) -> Result<AuthResult, DomainError> {
        self.identify_uc.execute(probe).await
    }

    pub async fn active_drivers(&self) -> Result<Vec<NormalizedDriver>, DomainError> {
        self.drivers_uc.list_active().await
    }

    pub async fn driver(&self, user_id: &str) -> Result<NormalizedDriver, DomainError> {
        self.drivers_uc.get(user_id).await
    }

    pub async fn touch_login(&self, user_id: &str) -> Result<bool, DomainError> {
        self.drivers_uc.touch_login(user_id).await
    }

    pub async fn import(&self, documents: &[DriverDocument]) -> Result<Vec<String>, DomainError> {
        self.drivers_uc.import(documents).await
    }

    pub async fn health(&self) -> Result<HealthReport, DomainError> {
        let active_drivers = self.drivers_uc.count_active().await?;
        Ok(HealthReport {
            success: true,
            data: "Driver identification service is running".into(),
            active_drivers,
            timestamp: timestamp::now_millis(),
        })
    }
}
