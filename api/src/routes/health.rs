use crate::response::ApiResponse;
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use util::state::AppState;

/// Builds the `/health` route group.
///
/// This includes a single `GET /health` endpoint that reports API liveness
/// and pings the database. Useful for uptime checks, load balancers, or
/// deployment health monitoring.
///
/// # Returns
/// An Axum `Router` with the `GET /health` route configured.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Debug, Serialize, Default)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
}

/// GET /health
///
/// Returns a success response while the API is up and its database answers a
/// ping.
///
/// ### Response
/// - `200 OK`
///
/// ```json
/// {
///   "success": true,
///   "data": { "status": "ok", "database": "ok" },
///   "message": "Health check passed"
/// }
/// ```
///
/// - `503 Service Unavailable` when the database does not respond.
async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthStatus>>) {
    match state.db().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                HealthStatus {
                    status: "ok".to_string(),
                    database: "ok".to_string(),
                },
                "Health check passed",
            )),
        ),
        Err(err) => {
            tracing::error!(error = %err, "Health check could not reach the database");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::error("Database unreachable")),
            )
        }
    }
}
