//! Current-conditions weather lookup (weatherapi.com `current.json`).
//!
//! Used to pre-fill the humidity and wind-speed inputs. A single request is
//! made per lookup; failures are reported to the caller and never retried.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::WeatherConfig;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Please enter a location.")]
    EmptyLocation,

    #[error("weather API key is not configured")]
    MissingApiKey,

    #[error("request to weather service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather service returned {0}")]
    Status(StatusCode),

    #[error("unexpected weather payload: {0}")]
    Parse(String),
}

/// Current conditions relevant to the energy model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: String,
    pub humidity: f64,
    /// km/h
    pub wind_speed: f64,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, location: &str) -> Result<CurrentWeather, WeatherError>;
}

pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    pub fn new(cfg: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn current(&self, location: &str) -> Result<CurrentWeather, WeatherError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(WeatherError::EmptyLocation);
        }
        if self.api_key.is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let url = format!("{}/current.json", self.base_url);
        debug!(%location, "fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", location)])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(%location, status = %response.status(), "weather service returned error status");
            return Err(WeatherError::Status(response.status()));
        }

        let body = response.text().await?;
        let parsed: WeatherApiResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        let weather = CurrentWeather {
            location: parsed
                .location
                .map(|l| l.name)
                .unwrap_or_else(|| location.to_string()),
            humidity: parsed.current.humidity,
            wind_speed: parsed.current.wind_kph,
        };

        info!(
            location = %weather.location,
            humidity = weather.humidity,
            wind_speed = weather.wind_speed,
            "fetched current weather"
        );
        Ok(weather)
    }
}

// weatherapi.com response structures
#[derive(Debug, Deserialize)]
struct WeatherApiResponse {
    location: Option<WeatherApiLocation>,
    current: WeatherApiCurrent,
}

#[derive(Debug, Deserialize)]
struct WeatherApiLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WeatherApiCurrent {
    humidity: f64,
    wind_kph: f64,
}
