//! Model artifact loader

use super::{LinearRegressionModel, MLModel, ModelError, FEATURE_NAMES};
use serde::{Deserialize, Serialize};
use std::{io::ErrorKind, path::Path, sync::Arc};
use tracing::info;

/// Serialized predictor, tagged by `model_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum ModelArtifact {
    LinearRegression(LinearRegressionModel),
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let artifact: Self =
            serde_json::from_str(json).map_err(|e| ModelError::Invalid(e.to_string()))?;
        artifact.validate()?;
        Ok(artifact)
    }

    fn validate(&self) -> Result<(), ModelError> {
        match self {
            Self::LinearRegression(model) => {
                if model.metadata.feature_names != FEATURE_NAMES {
                    return Err(ModelError::Invalid(format!(
                        "expected features {:?}, artifact declares {:?}",
                        FEATURE_NAMES, model.metadata.feature_names
                    )));
                }
                model.validate()
            }
        }
    }

    pub fn into_model(self) -> Arc<dyn MLModel> {
        match self {
            Self::LinearRegression(model) => Arc::new(model),
        }
    }
}

/// Loader for model artifacts stored on local disk
pub struct ModelLoader;

impl ModelLoader {
    pub fn load(path: impl AsRef<Path>) -> Result<Arc<dyn MLModel>, ModelError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ModelError::NotFound(path.to_path_buf()),
            _ => ModelError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let model = ModelArtifact::from_json(&json)?.into_model();

        info!(
            model = %model.metadata().model_id,
            version = %model.metadata().version,
            path = %path.display(),
            "Model loaded successfully"
        );

        Ok(model)
    }
}
