//! Single-page prediction form.
//!
//! The whole form state travels with every request, so a failed weather
//! lookup simply re-renders the submitted values.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::{de, Deserialize, Deserializer};
use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};

use crate::{
    app::AppState,
    config::FormConfig,
    predictor::{
        clamp_finite, estimate_cost, unit_cost, CostEstimate, PredictionInput, PredictionReport,
        HUMIDITY_RANGE, WIND_SPEED_RANGE,
    },
    report::{self, REPORT_CONTENT_TYPE, REPORT_FILE_NAME},
    weather::{CurrentWeather, WeatherError},
};

use super::{error::ApiError, render};

/// Raw form fields; blanks fall back to the configured widget defaults.
#[derive(Debug, Default, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub month: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cost_per_unit: Option<f64>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => s.trim().parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

/// Widget values after defaults and range clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub location: String,
    pub input: PredictionInput,
    pub cost_per_unit: f64,
}

impl FormState {
    pub fn resolve(raw: FormInput, defaults: &FormConfig) -> Self {
        let input = PredictionInput::clamped(
            raw.month.unwrap_or(1),
            raw.humidity.unwrap_or(defaults.default_humidity),
            raw.wind_speed.unwrap_or(defaults.default_wind_speed),
        );
        let cost_per_unit =
            unit_cost(raw.cost_per_unit.unwrap_or(defaults.default_cost_per_unit));

        Self {
            location: raw.location.unwrap_or_default(),
            input,
            cost_per_unit,
        }
    }

    /// Replaces humidity and wind speed with fetched values, clamped to the sliders.
    pub fn apply_weather(&mut self, weather: &CurrentWeather) {
        self.input.humidity = clamp_finite(weather.humidity, HUMIDITY_RANGE);
        self.input.wind_speed = clamp_finite(weather.wind_speed, WIND_SPEED_RANGE);
    }
}

pub enum WeatherNotice {
    Fetched(CurrentWeather),
    Failed(String),
}

pub struct PredictionOutcome {
    pub report: PredictionReport,
    pub cost: CostEstimate,
}

pub struct PageView<'a> {
    pub form: &'a FormState,
    pub defaults: &'a FormConfig,
    pub model_available: bool,
    pub weather: Option<WeatherNotice>,
    pub prediction: Option<PredictionOutcome>,
    pub error: Option<String>,
}

impl<'a> PageView<'a> {
    fn new(st: &'a AppState, form: &'a FormState) -> Self {
        Self {
            form,
            defaults: &st.cfg.form,
            model_available: st.model_available(),
            weather: None,
            prediction: None,
            error: None,
        }
    }
}

/// GET /
pub async fn index(State(st): State<AppState>, Query(raw): Query<FormInput>) -> Html<String> {
    let form = FormState::resolve(raw, &st.cfg.form);
    Html(render::page(&PageView::new(&st, &form)))
}

/// POST /weather
pub async fn fetch_weather(State(st): State<AppState>, Form(raw): Form<FormInput>) -> Html<String> {
    let mut form = FormState::resolve(raw, &st.cfg.form);

    let notice = match st.weather.current(&form.location).await {
        Ok(weather) => {
            form.apply_weather(&weather);
            WeatherNotice::Fetched(weather)
        }
        Err(WeatherError::EmptyLocation) => {
            WeatherNotice::Failed(WeatherError::EmptyLocation.to_string())
        }
        Err(e) => {
            warn!(location = %form.location, error = %e, "weather lookup failed");
            WeatherNotice::Failed(ApiError::from(e).user_message())
        }
    };

    let mut view = PageView::new(&st, &form);
    view.weather = Some(notice);
    Html(render::page(&view))
}

/// POST /predict
pub async fn predict(State(st): State<AppState>, Form(raw): Form<FormInput>) -> Response {
    let form = FormState::resolve(raw, &st.cfg.form);
    let mut view = PageView::new(&st, &form);

    let Some(model) = st.model.as_ref() else {
        view.error = Some(ApiError::ModelUnavailable.user_message());
        return (StatusCode::SERVICE_UNAVAILABLE, Html(render::page(&view))).into_response();
    };

    match model.report(&form.input) {
        Ok(report) => {
            info!(
                month = report.month,
                prediction = report.predicted_consumption,
                "prediction served"
            );
            view.prediction = Some(PredictionOutcome {
                cost: estimate_cost(report.predicted_consumption, form.cost_per_unit),
                report,
            });
            Html(render::page(&view)).into_response()
        }
        Err(e) => {
            let error = ApiError::from(e);
            tracing::error!(error = %error, "prediction failed");
            view.error = Some(error.user_message());
            (StatusCode::INTERNAL_SERVER_ERROR, Html(render::page(&view))).into_response()
        }
    }
}

/// GET /report.csv
pub async fn download_report(
    State(st): State<AppState>,
    Query(raw): Query<FormInput>,
) -> Result<Response, ApiError> {
    let model = st.model.as_ref().ok_or(ApiError::ModelUnavailable)?;
    let form = FormState::resolve(raw, &st.cfg.form);

    let report = model.report(&form.input)?;
    let csv = report::to_csv(&report)?;

    Ok((
        [
            (header::CONTENT_TYPE, REPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
