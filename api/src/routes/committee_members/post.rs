use crate::response::{ApiResponse, domain_error_response};
use crate::routes::committee_members::common::CreateCommitteeMemberRequest;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::error::DomainError;
use db::models::committee_member::Model as Member;
use util::state::AppState;
use validator::Validate;

/// POST /api/committee-members
///
/// Adds a person to the attendance roster. Admin-only access.
///
/// ### Request Body
/// ```json
/// { "name": "Sipho Dlamini", "department": "general_affairs" }
/// ```
///
/// ### Response: 201 Created
/// - JSON body with the created roster entry
///
/// ### Errors:
/// - 400 Bad Request — Validation failure
pub async fn create_committee_member(
    State(app_state): State<AppState>,
    Json(req): Json<CreateCommitteeMemberRequest>,
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

    match Member::create(app_state.db(), &req.name, req.department).await {
        Ok(member) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                member,
                "Committee member created successfully",
            )),
        )
            .into_response(),
        Err(err) => domain_error_response::<()>(DomainError::from(err)).into_response(),
    }
}
