//! Safety classifier capability.
//!
//! The scoring pipeline only needs `predict(features) -> label`. The bundled
//! [`LinearClassifier`] evaluates an exported logistic model; any other
//! model-serving backend can implement [`SafetyClassifier`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SafetyLabel;

/// Feature vector consumed by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierFeatures {
    pub latitude: f64,
    pub longitude: f64,
    /// Composite risk index
    pub occurrence: f64,
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("non-finite feature value: {0}")]
    NonFiniteFeature(&'static str),
    #[error("classifier backend failed: {0}")]
    Backend(String),
}

/// Binary safe/risky classifier.
pub trait SafetyClassifier: Send + Sync {
    fn predict(&self, features: &ClassifierFeatures) -> Result<SafetyLabel, ClassifierError>;
}

/// Logistic model over (latitude, longitude, occurrence).
///
/// `safe` when `sigmoid(intercept + w·x) >= threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub intercept: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub occurrence: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

impl Default for LinearClassifier {
    /// Safe when the composite risk index is below 0.5.
    fn default() -> Self {
        Self {
            intercept: 5.0,
            latitude: 0.0,
            longitude: 0.0,
            occurrence: -10.0,
            threshold: default_threshold(),
        }
    }
}

impl LinearClassifier {
    /// Probability that the location is safe.
    pub fn probability(&self, features: &ClassifierFeatures) -> f64 {
        let z = self.intercept
            + self.latitude * features.latitude
            + self.longitude * features.longitude
            + self.occurrence * features.occurrence;
        1.0 / (1.0 + (-z).exp())
    }
}

impl SafetyClassifier for LinearClassifier {
    fn predict(&self, features: &ClassifierFeatures) -> Result<SafetyLabel, ClassifierError> {
        for (name, value) in [
            ("latitude", features.latitude),
            ("longitude", features.longitude),
            ("occurrence", features.occurrence),
        ] {
            if !value.is_finite() {
                return Err(ClassifierError::NonFiniteFeature(name));
            }
        }

        let class = u8::from(self.probability(features) >= self.threshold);
        Ok(SafetyLabel::from_class(class))
    }
}
