use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use util::state::AppState;

use crate::response::{ApiResponse, domain_error_response};
use crate::routes::participants::common::MoveParticipantRequest;
use db::models::participant::Model as Participant;

/// PUT /api/participants/{participant_id}/team
///
/// Moves a participant into the given team. This is the manual override:
/// unlike automatic assignment it ignores the per-team capacity cap. Admin
/// only.
///
/// ### Request Body
/// ```json
/// { "team_id": 2 }
/// ```
///
/// ### Responses
/// - `200 OK` — the updated participant.
/// - `404 Not Found` — unknown participant or target team.
pub async fn move_participant(
    State(app_state): State<AppState>,
    Path(participant_id): Path<i64>,
    Json(req): Json<MoveParticipantRequest>,
) -> impl IntoResponse {
    match Participant::move_to_team(app_state.db(), participant_id, req.team_id).await {
        Ok(participant) => (
            StatusCode::OK,
            Json(ApiResponse::success(participant, "Participant moved")),
        )
            .into_response(),
        Err(err) => domain_error_response::<()>(err).into_response(),
    }
}
