//! # User Creation Routes
//!
//! - `POST /api/users`: Create a committee account
//!
//! All routes require admin privileges.

use crate::response::{ApiResponse, domain_error_response};
use crate::routes::users::common::CreateUserRequest;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::Model as User;
use util::state::AppState;
use validator::Validate;

/// POST /api/users
///
/// Creates a committee account. Admin-only access.
///
/// ### Request Body
/// ```json
/// {
///   "username": "thandi",
///   "password": "Secret123",
///   "display_name": "Thandi Nkosi",
///   "department": "protocol",
///   "role": "committee"
/// }
/// ```
///
/// ### Response: 201 Created
/// - JSON body with the created user (excluding password hash)
///
/// ### Errors:
/// - 400 Bad Request — Validation failure or weak password
/// - 409 Conflict — Duplicate username
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
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

    match User::create(
        app_state.db(),
        &req.username,
        &req.password,
        &req.display_name,
        req.department,
        req.role,
    )
    .await
    {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(user, "User created successfully")),
        )
            .into_response(),
        Err(err) => domain_error_response::<()>(err).into_response(),
    }
}
