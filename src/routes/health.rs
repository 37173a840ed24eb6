use axum::{extract::State, Json};
use chrono::Utc;

use crate::dto::math_problem_dto::HealthResponse;
use crate::AppState;

/// Reports whether the provider credential is configured, without calling the provider.
#[axum::debug_handler]
pub async fn math_problem_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        has_api_key: state.has_api_key,
        timestamp: Utc::now(),
    })
}
