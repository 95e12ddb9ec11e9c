use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use db::models::user::Model as User;

/// DELETE /api/users/{user_id}
///
/// Delete an account by its ID. Only admins can access this endpoint, and
/// admins cannot delete their own account.
///
/// Attendance marks and participant registrations recorded by the deleted
/// account survive; their `marked_by` / `registered_by` references are set
/// to null.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// { "success": true, "data": {}, "message": "User deleted successfully" }
/// ```
///
/// - `403 Forbidden` — attempting to delete your own account.
/// - `404 Not Found`
pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if user_id == caller.id {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("You cannot delete your own account")),
        );
    }

    match User::delete(app_state.db(), user_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "User deleted successfully")),
        ),
        Err(err) => domain_error_response(err),
    }
}
