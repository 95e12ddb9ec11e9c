use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, domain_error_response};
use crate::routes::participants::common::{RegisterParticipantRequest, RegistrationResponse};
use db::models::participant::Model as Participant;

/// POST /api/participants
///
/// Registers a participant and auto-assigns them a team: a uniformly random
/// pick among teams that still have room, or a brand-new "Team {n+1}" when
/// everything is full. Existing participants are never reshuffled.
///
/// ### Request Body
/// ```json
/// { "name": "Lerato Mokoena" }
/// ```
///
/// ### Response: 201 Created
/// ```json
/// {
///   "success": true,
///   "data": { "participant": { ... }, "team": { "id": 4, "name": "Team 4" } },
///   "message": "Participant registered"
/// }
/// ```
pub async fn register_participant(
    State(app_state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Json(req): Json<RegisterParticipantRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(common::format_validation_errors(
                &e,
            ))),
        )
            .into_response();
    }

    match Participant::register(app_state.db(), &req.name, Some(caller.id)).await {
        Ok((participant, team)) => {
            tracing::info!(
                participant_id = participant.id,
                team_id = team.id,
                registered_by = caller.id,
                "Participant registered"
            );
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    RegistrationResponse { participant, team },
                    "Participant registered",
                )),
            )
                .into_response()
        }
        Err(err) => domain_error_response::<()>(err).into_response(),
    }
}
