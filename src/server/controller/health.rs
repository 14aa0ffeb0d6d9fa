use axum::response::IntoResponse;

use crate::{
    model::api::{ApiSuccess, HealthDto},
    server::extract::Json,
};

pub static HEALTH_TAG: &str = "health";

/// Liveness check.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is up", body = HealthDto)
    ),
)]
pub async fn health() -> impl IntoResponse {
    Json(ApiSuccess::new(HealthDto {
        status: "ok".to_string(),
    }))
}
