use axum::{Json, extract::State, http::StatusCode};
use common::format_validation_errors;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use db::error::DomainError;
use db::models::user::Model as User;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// POST /api/auth/login
///
/// Verifies credentials and opens a session. Logging in invalidates any
/// session the account already had somewhere else — one active session per
/// account.
///
/// ### Request Body
/// ```json
/// { "username": "thandi", "password": "Secret123" }
/// ```
///
/// ### Responses
/// - `200 OK` — `data` carries `{ token, user }`; send the token back as
///   `Authorization: Bearer <token>`.
/// - `400 Bad Request` — empty username or password.
/// - `401 Unauthorized` — unknown username, wrong password, or deactivated
///   account (deliberately indistinguishable).
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, Json<ApiResponse<LoginResponse>>) {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&e))),
        );
    }

    match User::authenticate(app_state.db(), &req.username, &req.password).await {
        Ok(user) => {
            let token = user.session_token.clone().unwrap_or_default();
            tracing::info!(user_id = user.id, "User logged in");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    LoginResponse {
                        token,
                        user: Some(user),
                    },
                    "Login successful",
                )),
            )
        }
        Err(err) => domain_error_response(err),
    }
}

/// POST /api/auth/logout
///
/// Clears the caller's session token. Safe to call twice; a second logout is
/// a no-op.
///
/// ### Responses
/// - `200 OK`
/// - `401 Unauthorized` — no valid session token supplied.
pub async fn logout(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    match User::logout(app_state.db(), user.id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Logged out")),
        ),
        Err(err) => domain_error_response(DomainError::from(err)),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// POST /api/auth/change-password
///
/// Replaces the caller's password and ends their session, forcing a fresh
/// login with the new credentials.
///
/// ### Request Body
/// ```json
/// { "old_password": "Secret123", "new_password": "Stronger456" }
/// ```
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` — new password fails the policy (min 8 chars with an
///   uppercase letter, a lowercase letter, and a digit).
/// - `401 Unauthorized` — old password does not match.
pub async fn change_password(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&e))),
        );
    }

    match User::change_password(
        app_state.db(),
        user.id,
        &req.old_password,
        &req.new_password,
    )
    .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Empty,
                "Password changed, please log in again",
            )),
        ),
        Err(err) => domain_error_response(err),
    }
}
