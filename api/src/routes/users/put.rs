use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use util::state::AppState;

use crate::response::{ApiResponse, domain_error_response};
use crate::routes::users::common::UpdateUserRequest;
use db::models::user::Model as User;

/// PUT /api/users/{user_id}
///
/// Updates display name, department, role, or active flag. All fields are
/// optional; omitted ones are left untouched. Requires admin privileges.
///
/// Deactivating an account (`"active": false`) also clears its session
/// token, so a client that is currently logged in on it stops validating on
/// the next poll.
///
/// ### Request Body
/// ```json
/// { "display_name": "Thandi N.", "active": false }
/// ```
///
/// ### Responses
/// - `200 OK` — the updated user object.
/// - `404 Not Found`
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    match User::update_profile(
        app_state.db(),
        user_id,
        req.display_name,
        req.department,
        req.role,
        req.active,
    )
    .await
    {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(user, "User updated successfully")),
        )
            .into_response(),
        Err(err) => domain_error_response::<()>(err).into_response(),
    }
}
