use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::app::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    checks: HealthChecks,
}

/// Individual health checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    model: ComponentHealth,
}

/// Health status of a component
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ComponentHealth {
    fn healthy(detail: String) -> Self {
        Self {
            status: "healthy".to_string(),
            detail: Some(detail),
            error: None,
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            detail: None,
            error: Some(error),
        }
    }
}

fn check_model(state: &AppState) -> ComponentHealth {
    match &state.model {
        Some(model) => {
            let meta = model.metadata();
            ComponentHealth::healthy(format!("{} v{}", meta.model_id, meta.version))
        }
        None => ComponentHealth::unhealthy("model artifact not loaded".to_string()),
    }
}

/// GET /health
///
/// The service keeps serving the form without a model, so a missing model
/// reports `degraded` rather than failing.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let model = check_model(&state);
    let healthy = model.status == "healthy";

    let response = HealthResponse {
        status: (if healthy { "healthy" } else { "degraded" }).to_string(),
        timestamp: chrono::Utc::now(),
        checks: HealthChecks { model },
    };

    (StatusCode::OK, Json(response))
}

/// GET /health/ready - 200 once a model is loaded
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.model_available() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
