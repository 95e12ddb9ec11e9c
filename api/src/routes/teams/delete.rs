use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use util::state::AppState;

use crate::response::{ApiResponse, domain_error_response};
use db::models::team::Model as Team;

#[derive(Debug, Serialize, Default)]
pub struct TeamDeletedResponse {
    pub removed_participants: u64,
}

/// DELETE /api/teams/{team_id}
///
/// Deletes a team and every participant currently in it, in one transaction.
/// The client is expected to confirm with the operator before calling.
/// Admin-only.
///
/// ### Responses
/// - `200 OK` — `data` reports how many participants were removed with the
///   team.
/// - `404 Not Found`
pub async fn delete_team(
    State(app_state): State<AppState>,
    Path(team_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<TeamDeletedResponse>>) {
    match Team::delete_with_participants(app_state.db(), team_id).await {
        Ok(removed_participants) => {
            tracing::info!(team_id, removed_participants, "Team deleted");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    TeamDeletedResponse {
                        removed_participants,
                    },
                    "Team deleted successfully",
                )),
            )
        }
        Err(err) => domain_error_response(err),
    }
}
