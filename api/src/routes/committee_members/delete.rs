use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use db::models::committee_member::Model as Member;

/// DELETE /api/committee-members/{member_id}
///
/// Removes a person from the roster. Their attendance rows go with them (FK
/// cascade), so past reports shrink accordingly. Requires admin privileges.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found`
pub async fn delete_committee_member(
    State(app_state): State<AppState>,
    Path(member_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    match Member::delete(app_state.db(), member_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Empty,
                "Committee member deleted successfully",
            )),
        ),
        Err(err) => domain_error_response(err),
    }
}
