use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use util::state::AppState;
use validator::Validate;

use crate::response::{ApiResponse, domain_error_response};
use crate::routes::teams::common::CreateTeamRequest;
use db::error::DomainError;
use db::models::team::Model as Team;

/// POST /api/teams
///
/// Creates a named team. Admin-only; the allocator will start considering
/// the new team for automatic assignment immediately.
///
/// ### Request Body
/// ```json
/// { "name": "Team 9" }
/// ```
///
/// ### Response: 201 Created
pub async fn create_team(
    State(app_state): State<AppState>,
    Json(req): Json<CreateTeamRequest>,
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

    match Team::create(app_state.db(), &req.name).await {
        Ok(team) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(team, "Team created successfully")),
        )
            .into_response(),
        Err(err) => domain_error_response::<()>(DomainError::from(err)).into_response(),
    }
}
