use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthData {
    pub status: String,
    pub storage: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = HealthData),
        (status = 503, description = "Storage unreachable", body = HealthData),
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthData>) {
    let storage = state.products.backend().to_string();
    match state.products.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok".to_string(),
                storage,
            }),
        ),
        Err(err) => {
            tracing::warn!(error = ?err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "unavailable".to_string(),
                    storage,
                }),
            )
        }
    }
}
