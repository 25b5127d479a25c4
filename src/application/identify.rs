use crate::application::drivers::validate_documents;
use crate::application::matcher::{find_best_match, Candidate, MatchOutcome, MATCH_THRESHOLD};
use crate::domain::entities::driver::{Driver, NormalizedDriver};
use crate::domain::error::DomainError;
use crate::domain::ports::driver_store::DriverStore;
use crate::domain::values::confidence::Confidence;
use crate::domain::values::embedding::FeatureVector;
use async_trait::async_trait;
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

/// Result of one identification attempt. A failed match is a normal value
/// here; infrastructure failures are returned as `Err` by the use case.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResult {
    pub success: bool,
    pub driver: Option<NormalizedDriver>,
    pub confidence: Option<f64>,
    pub message: String,
}

impl AuthResult {
    pub fn matched(driver: NormalizedDriver, confidence: Confidence) -> Self {
        Self {
            success: true,
            driver: Some(driver),
            confidence: Some(confidence.value()),
            message: "Authentication successful".into(),
        }
    }

    pub fn no_match() -> Self {
        Self {
            success: false,
            driver: None,
            confidence: None,
            message: "No matching driver found".into(),
        }
    }
}

/// Side effect run after a successful identification. Failures are logged by
/// the caller and never change the authentication outcome.
#[async_trait]
pub trait PostMatchHook: Send + Sync {
    fn name(&self) -> &str;

    async fn after_match(&self, driver: &Driver) -> Result<(), DomainError>;
}

/// Records the login time on the matched driver.
pub struct TouchLoginHook {
    store: Arc<dyn DriverStore>,
}

impl TouchLoginHook {
    pub fn new(store: Arc<dyn DriverStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostMatchHook for TouchLoginHook {
    fn name(&self) -> &str {
        "touch_login"
    }

    async fn after_match(&self, driver: &Driver) -> Result<(), DomainError> {
        if self.store.touch_login(&driver.user_id).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!(
                "no driver record updated for user_id {}",
                driver.user_id
            )))
        }
    }
}

pub struct IdentifyUseCase {
    store: Arc<dyn DriverStore>,
    hooks: Vec<Arc<dyn PostMatchHook>>,
}

impl IdentifyUseCase {
    pub fn new(store: Arc<dyn DriverStore>) -> Self {
        let touch: Arc<dyn PostMatchHook> = Arc::new(TouchLoginHook::new(store.clone()));
        Self::with_hooks(store, vec![touch])
    }

    pub fn with_hooks(store: Arc<dyn DriverStore>, hooks: Vec<Arc<dyn PostMatchHook>>) -> Self {
        Self { store, hooks }
    }

    pub async fn execute(&self, probe: &FeatureVector) -> Result<AuthResult, DomainError> {
        let documents = self.store.list_active().await?;

        let candidates = validate_documents(documents)
            .into_iter()
            .filter(|d| d.account_status.is_eligible())
            .map(|driver| Candidate {
                key: driver.user_id.clone(),
                embedding: driver.face_embedding.clone(),
                record: driver,
            });

        match find_best_match(probe, candidates, MATCH_THRESHOLD) {
            MatchOutcome::Matched { record, confidence } => {
                info!("identified driver {} (confidence {confidence})", record.user_id);
                let normalized = record.normalize();
                self.run_hooks(&record).await;
                Ok(AuthResult::matched(normalized, confidence))
            }
            MatchOutcome::NoMatch => {
                info!("no driver met the {MATCH_THRESHOLD} similarity threshold");
                Ok(AuthResult::no_match())
            }
        }
    }

    async fn run_hooks(&self, driver: &Driver) {
        for hook in &self.hooks {
            if let Err(e) = hook.after_match(driver).await {
                warn!("{} failed for driver {}: {e}", hook.name(), driver.user_id);
            }
        }
    }
}
