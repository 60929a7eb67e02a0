//! Machine Learning Module
//!
//! The predictor is a pre-trained regression model shipped as a JSON
//! artifact. It is loaded once at startup and treated as a black box
//! afterwards:
//! - `loader` reads and validates the artifact
//! - `linear` holds the concrete model implementation
//! - `inference` maps form inputs onto the model's feature vector

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub mod inference;
pub mod linear;
pub mod loader;

pub use inference::EnergyModel;
pub use linear::{LinearRegressionModel, MLModel};
pub use loader::{ModelArtifact, ModelLoader};

/// Feature order expected by every energy model artifact.
pub const FEATURE_NAMES: [&str; 3] = ["month", "humidity", "wind_speed"];

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid model artifact: {0}")]
    Invalid(String),

    #[error("feature count mismatch: expected {expected}, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("model produced a non-finite prediction ({0})")]
    NonFinite(f64),
}

/// ML Model Type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    LinearRegression,
}

/// ML Model Metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_id: String,
    pub version: String,
    #[serde(default)]
    pub trained_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub training_samples: Option<usize>,
    pub feature_names: Vec<String>,
}

/// Feature Vector for ML models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    pub features: Vec<f64>,
    pub feature_names: Vec<String>,
}

impl FeatureVector {
    pub fn new(features: Vec<f64>, feature_names: Vec<String>) -> Result<Self, ModelError> {
        if features.len() != feature_names.len() {
            return Err(ModelError::FeatureMismatch {
                expected: feature_names.len(),
                actual: features.len(),
            });
        }
        Ok(Self {
            features,
            feature_names,
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// ML Prediction Result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub value: f64,
}

impl Prediction {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}
