use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    app::AppState,
    ml::ModelMetadata,
    predictor::{estimate_cost, CostEstimate, PredictionInput, PredictionReport},
    weather::CurrentWeather,
};

use super::error::ApiError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/predict", post(predict))
        .route("/model", get(get_model))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub location: String,
}

pub async fn get_weather(
    State(st): State<AppState>,
    Query(q): Query<WeatherQuery>,
) -> Result<Json<CurrentWeather>, ApiError> {
    let weather = st.weather.current(&q.location).await?;
    Ok(Json(weather))
}

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    pub month: u32,
    pub humidity: f64,
    pub wind_speed: f64,
    #[validate(range(min = 0.0))]
    pub cost_per_unit: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub report: PredictionReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<CostEstimate>,
}

pub async fn predict(
    State(st): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let model = st.model.as_ref().ok_or(ApiError::ModelUnavailable)?;

    req.validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;
    let input = PredictionInput::new(req.month, req.humidity, req.wind_speed)?;

    let report = model.report(&input)?;
    let cost = req
        .cost_per_unit
        .map(|unit| estimate_cost(report.predicted_consumption, unit));

    tracing::info!(
        month = report.month,
        prediction = report.predicted_consumption,
        "prediction served"
    );
    Ok(Json(PredictResponse { report, cost }))
}

pub async fn get_model(State(st): State<AppState>) -> Result<Json<ModelMetadata>, ApiError> {
    let model = st.model.as_ref().ok_or(ApiError::ModelUnavailable)?;
    Ok(Json(model.metadata().clone()))
}
