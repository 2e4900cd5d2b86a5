//! Route handlers.

pub mod lists;
pub mod users;

use axum::Json;

use super::dto::HealthResponse;

/// `GET /health`.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
    })
}
