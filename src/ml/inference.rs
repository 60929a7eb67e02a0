//! Energy consumption inference
//!
//! Wraps the loaded model and maps a [`PredictionInput`] onto its feature
//! vector in the `[month, humidity, wind_speed]` order.

use super::{FeatureVector, MLModel, ModelError, ModelMetadata, FEATURE_NAMES};
use crate::predictor::{PredictionInput, PredictionReport};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct EnergyModel {
    model: Arc<dyn MLModel>,
}

impl EnergyModel {
    pub fn new(model: Arc<dyn MLModel>) -> Self {
        Self { model }
    }

    pub fn metadata(&self) -> &ModelMetadata {
        self.model.metadata()
    }

    /// Predicted consumption in kWh. Always finite on success.
    pub fn predict(&self, input: &PredictionInput) -> Result<f64, ModelError> {
        let features = FeatureVector::new(
            input.features().to_vec(),
            FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        )?;

        let value = self.model.predict(&features)?.value;
        if !value.is_finite() {
            return Err(ModelError::NonFinite(value));
        }

        debug!(
            month = input.month,
            humidity = input.humidity,
            wind_speed = input.wind_speed,
            prediction = value,
            "inference completed"
        );
        Ok(value)
    }

    pub fn report(&self, input: &PredictionInput) -> Result<PredictionReport, ModelError> {
        let predicted = self.predict(input)?;
        Ok(PredictionReport::from_prediction(input, predicted))
    }
}

impl std::fmt::Debug for EnergyModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnergyModel")
            .field("model_id", &self.metadata().model_id)
            .field("model_type", &self.model.model_type())
            .finish()
    }
}
