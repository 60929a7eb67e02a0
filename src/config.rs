use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf};

use crate::telemetry::LogFormat;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub weather: WeatherConfig,
    pub model: ModelConfig,
    pub form: FormConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

/// Current-conditions weather provider (weatherapi.com compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub base_url: String,
    /// Supplied through `ECP__WEATHER__API_KEY`; empty disables lookups.
    pub api_key: String,
    pub http_timeout_seconds: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.weatherapi.com/v1".to_string(),
            api_key: String::new(),
            http_timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/energy_model.json"),
        }
    }
}

/// Initial widget values for the prediction form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub default_humidity: f64,
    pub default_wind_speed: f64,
    pub default_cost_per_unit: f64,
    pub cost_step: f64,
    pub currency: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_humidity: 50.0,
            default_wind_speed: 10.0,
            default_cost_per_unit: 10.0,
            cost_step: 0.5,
            currency: "Rs.".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::figment("config/default.toml").extract().map_err(Into::into)
    }

    fn figment(path: &str) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("ECP__").split("__"))
    }
}
