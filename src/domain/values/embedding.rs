use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingDecodeError {
    #[error("embedding payload is empty")]
    Empty,

    #[error("embedding payload is not a numeric array: {0}")]
    Malformed(String),
}

/// Face feature vector. Dimension is not fixed; only vectors of equal length
/// are comparable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Decodes the stored payload form, a JSON array of numbers.
    pub fn decode(payload: &str) -> Result<Self, EmbeddingDecodeError> {
        let trimmed = payload.trim();
        if trimmed.is_empty() {
            return Err(EmbeddingDecodeError::Empty);
        }
        serde_json::from_str::<Vec<f64>>(trimmed)
            .map(Self)
            .map_err(|e| EmbeddingDecodeError::Malformed(e.to_string()))
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".into())
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn similarity(&self, other: &FeatureVector) -> f64 {
        crate::domain::values::similarity::cosine(&self.0, &other.0)
    }
}
