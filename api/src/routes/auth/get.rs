use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use util::state::AppState;

use crate::response::{ApiResponse, domain_error_response};
use db::error::DomainError;
use db::models::user::Model as User;

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub user_id: i64,
    pub token: String,
}

#[derive(Debug, Serialize, Default)]
pub struct SessionStatus {
    pub valid: bool,
}

/// GET /api/auth/session?user_id=&token=
///
/// Session liveness poll. Clients call this every few seconds; the moment the
/// same account logs in elsewhere (which rotates the stored token) this
/// starts answering `valid: false` and the client must drop its local
/// session.
///
/// Public on purpose: the token being checked may already be stale, so it
/// cannot ride in the Authorization header.
///
/// ### Responses
/// - `200 OK` — `data` is `{ "valid": true | false }`.
pub async fn session_status(
    State(app_state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> (StatusCode, Json<ApiResponse<SessionStatus>>) {
    match User::validate_session(app_state.db(), query.user_id, &query.token).await {
        Ok(valid) => {
            let message = if valid {
                "Session is active"
            } else {
                "Session has ended"
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(SessionStatus { valid }, message)),
            )
        }
        Err(err) => domain_error_response(DomainError::from(err)),
    }
}
