use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use util::state::AppState;

use crate::response::{ApiResponse, domain_error_response};
use crate::routes::committee_members::common::UpdateCommitteeMemberRequest;
use db::models::committee_member::Model as Member;

/// PUT /api/committee-members/{member_id}
///
/// Updates a roster entry's name or department. Omitted fields keep their
/// value. Requires admin privileges.
///
/// ### Responses
/// - `200 OK` — the updated entry.
/// - `404 Not Found`
pub async fn update_committee_member(
    State(app_state): State<AppState>,
    Path(member_id): Path<i64>,
    Json(req): Json<UpdateCommitteeMemberRequest>,
) -> impl IntoResponse {
    match Member::update(app_state.db(), member_id, req.name, req.department).await {
        Ok(member) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                member,
                "Committee member updated successfully",
            )),
        )
            .into_response(),
        Err(err) => domain_error_response::<()>(err).into_response(),
    }
}
