//! Router-level tests for the prediction form and JSON API.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use energy_consumption_predictor::{
    api,
    app::AppState,
    config::Config,
    ml::{EnergyModel, LinearRegressionModel, ModelLoader},
    report,
    weather::{CurrentWeather, WeatherError, WeatherProvider},
};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FixedWeather(CurrentWeather);

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn current(&self, location: &str) -> Result<CurrentWeather, WeatherError> {
        if location.trim().is_empty() {
            return Err(WeatherError::EmptyLocation);
        }
        Ok(self.0.clone())
    }
}

struct DownWeather;

#[async_trait]
impl WeatherProvider for DownWeather {
    async fn current(&self, _location: &str) -> Result<CurrentWeather, WeatherError> {
        Err(WeatherError::Parse("connection reset".to_string()))
    }
}

fn model() -> EnergyModel {
    EnergyModel::new(Arc::new(LinearRegressionModel::with_weights(
        [-2.0, 1.0, -1.0],
        200.0,
    )))
}

fn oslo() -> Arc<dyn WeatherProvider> {
    Arc::new(FixedWeather(CurrentWeather {
        location: "Oslo".to_string(),
        humidity: 81.0,
        wind_speed: 18.0,
    }))
}

fn app(model: Option<EnergyModel>, weather: Arc<dyn WeatherProvider>) -> Router {
    api::router(AppState::from_parts(Config::default(), model, weather))
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn index_renders_default_widgets() {
    let response = app(Some(model()), oslo()).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("<option value=\"1\" selected>"));
    assert!(html.contains("name=\"humidity\" min=\"0\" max=\"100\" step=\"1\" value=\"50\""));
    assert!(html.contains("name=\"wind_speed\" min=\"0\" max=\"50\" step=\"0.1\" value=\"10\""));
    assert!(html.contains("<button type=\"submit\">Predict</button>"));
}

#[tokio::test]
async fn weather_fetch_prefills_sliders() {
    let response = app(Some(model()), oslo())
        .oneshot(form_post(
            "/weather",
            "location=Oslo&month=2&humidity=50&wind_speed=10&cost_per_unit=10",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Weather data fetched for Oslo:"));
    assert!(html.contains("name=\"humidity\" min=\"0\" max=\"100\" step=\"1\" value=\"81\""));
    assert!(html.contains("step=\"0.1\" value=\"18\""));
    assert!(html.contains("<option value=\"2\" selected>"));
}

#[tokio::test]
async fn failed_weather_keeps_prior_values() {
    let response = app(Some(model()), Arc::new(DownWeather))
        .oneshot(form_post(
            "/weather",
            "location=Nowhere&month=9&humidity=33&wind_speed=4.5&cost_per_unit=7",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Error fetching weather data"));
    assert!(html.contains("step=\"1\" value=\"33\""));
    assert!(html.contains("step=\"0.1\" value=\"4.5\""));
    assert!(html.contains("value=\"Nowhere\""));
}

#[tokio::test]
async fn blank_location_asks_for_one() {
    let response = app(Some(model()), oslo())
        .oneshot(form_post("/weather", "location=&humidity=&wind_speed=12"))
        .await
        .unwrap();

    let html = body_string(response).await;
    assert!(html.contains("Please enter a location."));
    assert!(html.contains("step=\"1\" value=\"50\""));
    assert!(html.contains("step=\"0.1\" value=\"12\""));
}

#[tokio::test]
async fn predict_renders_report_and_cost() {
    let response = app(Some(model()), oslo())
        .oneshot(form_post(
            "/predict",
            "location=&month=6&humidity=40&wind_speed=10&cost_per_unit=2.5",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 200 - 12 + 40 - 10
    let html = body_string(response).await;
    assert!(html.contains("Predicted Energy Consumption: <b>218.00 kWh</b>"));
    assert!(html.contains("Estimated Energy Cost: <b>545.00 Rs./-</b>"));
    assert!(html.contains("<h3>Prediction Report</h3>"));
    assert!(html.contains("/report.csv?month=6&amp;humidity=40&amp;wind_speed=10"));
}

#[tokio::test]
async fn missing_model_disables_prediction() {
    let router = app(None, oslo());

    let html = body_string(router.clone().oneshot(get("/")).await.unwrap()).await;
    assert!(html.contains("<button type=\"submit\" disabled>Predict</button>"));
    assert!(html.contains("Model not found."));

    let response = router
        .clone()
        .oneshot(form_post("/predict", "month=3&humidity=50&wind_speed=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_string(response).await.contains("Model not found."));

    let response = router
        .clone()
        .oneshot(json_post(
            "/api/v1/predict",
            serde_json::json!({ "month": 3, "humidity": 50.0, "wind_speed": 10.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = router.oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn csv_download_matches_displayed_report() {
    let response = app(Some(model()), oslo())
        .oneshot(get("/report.csv?month=6&humidity=40&wind_speed=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"prediction_report.csv\""
    );

    let parsed = report::from_csv(&body_string(response).await).unwrap();
    assert_eq!(parsed.month, 6);
    assert_eq!(parsed.humidity, 40.0);
    assert_eq!(parsed.wind_speed, 10.0);
    assert_eq!(parsed.predicted_consumption, 218.0);
}

#[tokio::test]
async fn json_predict_validates_ranges() {
    let router = app(Some(model()), oslo());

    let response = router
        .clone()
        .oneshot(json_post(
            "/api/v1/predict",
            serde_json::json!({ "month": 13, "humidity": 50.0, "wind_speed": 10.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .oneshot(json_post(
            "/api/v1/predict",
            serde_json::json!({
                "month": 6, "humidity": 40.0, "wind_speed": 10.0, "cost_per_unit": 2.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["report"]["predicted_consumption"], 218.0);
    assert_eq!(body["cost"]["energy_cost"], 436.0);
}

#[tokio::test]
async fn json_weather_maps_upstream_failures() {
    let router = app(Some(model()), Arc::new(DownWeather));
    let response = router
        .oneshot(get("/api/v1/weather?location=Oslo"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "WeatherUnavailable");
}

#[tokio::test]
async fn weather_service_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "name": "Lagos" },
            "current": { "humidity": 88, "wind_kph": 7.2 }
        })))
        .mount(&server)
        .await;

    let mut cfg = Config::default();
    cfg.weather.base_url = server.uri();
    cfg.weather.api_key = "test-key".to_string();
    cfg.model.path = "/nonexistent/energy_model.json".into();

    let state = AppState::new(cfg).unwrap();
    assert!(!state.model_available());

    let response = api::router(state)
        .oneshot(get("/api/v1/weather?location=Lagos"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["location"], "Lagos");
    assert_eq!(body["humidity"], 88.0);
    assert_eq!(body["wind_speed"], 7.2);
}

#[tokio::test]
async fn shipped_artifact_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/models/energy_model.json");
    let model = EnergyModel::new(ModelLoader::load(path).unwrap());
    assert_eq!(model.metadata().model_id, "energy_consumption_lr");

    let mut cfg = Config::default();
    cfg.model.path = path.into();
    let router = api::router(AppState::new(cfg).unwrap());

    let response = router.clone().oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router.oneshot(get("/api/v1/model")).await.unwrap();
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["feature_names"][2], "wind_speed");
}
