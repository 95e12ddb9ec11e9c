use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use db::models::participant::Model as Participant;

/// DELETE /api/participants/{participant_id}
///
/// Removes a single participant. Their team stays, whatever its remaining
/// size. Admin only.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found`
pub async fn delete_participant(
    State(app_state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    match Participant::delete(app_state.db(), participant_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Participant removed")),
        ),
        Err(err) => domain_error_response(err),
    }
}
