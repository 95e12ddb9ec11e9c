use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use util::state::AppState;

use crate::auth::session::{AuthUser, SessionUser};
use db::models::user::Model as User;

/// Implements extraction of `AuthUser` from request headers.
///
/// Reads the Bearer token from the `Authorization` header and resolves it to
/// a user row via `User::find_by_session_token`. Because sessions rotate on
/// every login, a token that was valid a moment ago stops resolving as soon
/// as the same account signs in anywhere else.
///
/// Guards that already resolved the caller insert the result into request
/// extensions; the cached value is reused here so a handler taking `AuthUser`
/// behind a guard does not hit the database twice.
///
/// # Errors
/// - Returns `401 Unauthorized` if the header is missing, malformed, or the
///   token does not match any active user's current session.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(*user);
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    (
                        StatusCode::UNAUTHORIZED,
                        "Missing or invalid Authorization header",
                    )
                })?;

        let user = User::find_by_session_token(state.db(), bearer.token())
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "Session lookup failed");
                (StatusCode::UNAUTHORIZED, "Could not validate session")
            })?
            .ok_or((StatusCode::UNAUTHORIZED, "Invalid or expired session token"))?;

        Ok(AuthUser(SessionUser {
            id: user.id,
            role: user.role,
        }))
    }
}
