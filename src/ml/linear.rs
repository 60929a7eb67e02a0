//! Linear regression predictor.

use super::{FeatureVector, ModelError, ModelMetadata, ModelType, Prediction, FEATURE_NAMES};
use serde::{Deserialize, Serialize};

/// Trait for ML models
pub trait MLModel: Send + Sync {
    /// Predict a value from features
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError>;

    /// Get model metadata
    fn metadata(&self) -> &ModelMetadata;

    fn model_type(&self) -> ModelType;
}

/// Ordinary least squares model: `intercept + Σ coefficient_i * feature_i`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressionModel {
    pub metadata: ModelMetadata,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressionModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64, metadata: ModelMetadata) -> Self {
        Self {
            metadata,
            coefficients,
            intercept,
        }
    }

    /// Model over the energy features with the given weights (for testing)
    pub fn with_weights(coefficients: [f64; 3], intercept: f64) -> Self {
        let metadata = ModelMetadata {
            model_id: "energy_linear".to_string(),
            version: "0.1.0".to_string(),
            trained_at: None,
            training_samples: None,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        };
        Self::new(coefficients.to_vec(), intercept, metadata)
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.len() != self.metadata.feature_names.len() {
            return Err(ModelError::Invalid(format!(
                "{} coefficients for {} features",
                self.coefficients.len(),
                self.metadata.feature_names.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Invalid(
                "coefficients and intercept must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl MLModel for LinearRegressionModel {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::FeatureMismatch {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let prediction: f64 = features
            .features
            .iter()
            .zip(self.coefficients.iter())
            .map(|(f, c)| f * c)
            .sum::<f64>()
            + self.intercept;

        Ok(Prediction::new(prediction))
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn model_type(&self) -> ModelType {
        ModelType::LinearRegression
    }
}
