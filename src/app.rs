use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use crate::{
    config::Config,
    ml::{EnergyModel, ModelError, ModelLoader},
    weather::{WeatherApiClient, WeatherProvider},
};

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    /// `None` when the artifact could not be loaded; prediction is disabled.
    pub model: Option<EnergyModel>,
    pub weather: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(cfg: Config) -> Result<Self> {
        let model = match ModelLoader::load(&cfg.model.path) {
            Ok(model) => Some(EnergyModel::new(model)),
            Err(e @ ModelError::NotFound(_)) => {
                error!(error = %e, "model not found, prediction disabled");
                None
            }
            Err(e) => {
                error!(error = %e, "failed to load model, prediction disabled");
                None
            }
        };

        if cfg.weather.api_key.is_empty() {
            info!("no weather API key configured, weather lookup will report an error");
        }
        let weather = Arc::new(WeatherApiClient::new(&cfg.weather)?);

        Ok(Self::from_parts(cfg, model, weather))
    }

    pub fn from_parts(
        cfg: Config,
        model: Option<EnergyModel>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            cfg: Arc::new(cfg),
            model,
            weather,
        }
    }

    pub fn model_available(&self) -> bool {
        self.model.is_some()
    }
}
