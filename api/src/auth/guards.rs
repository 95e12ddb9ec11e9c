use crate::auth::session::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::site_setting::Model as SiteSetting;
use util::state::AppState;

// --- Role Based Access Guards ---

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Helper to extract, validate the caller and insert the resolved identity
/// back into the request extensions.
async fn extract_and_insert_auth_user(
    state: &AppState,
    mut req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, state)
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);
    Ok((req, user))
}

/// Basic guard to ensure the request carries a live session token.
pub async fn allow_authenticated(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_auth_user(&app_state, req).await?;

    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_auth_user(&app_state, req).await?;

    if !user.0.is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}

// --- Maintenance Gate ---

/// Paths that stay reachable while maintenance mode is on, relative to the
/// `/api` nest. Login stays open so an admin can get in to switch the flag
/// off; the rest keep session polling and status pages working.
fn maintenance_exempt(method: &Method, path: &str) -> bool {
    (*method == Method::POST && path == "/auth/login")
        || (*method == Method::GET
            && matches!(path, "/auth/session" | "/settings/maintenance" | "/health"))
}

/// Maintenance gate for the whole `/api` surface.
///
/// While the `maintenance_mode` setting reads "true", every non-exempt
/// request from a non-admin (or unauthenticated) caller is answered with
/// `503` and the configured maintenance message. Admins pass through so they
/// can keep working and eventually lift the flag.
pub async fn maintenance_gate(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    if maintenance_exempt(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let enabled = match SiteSetting::maintenance_mode(app_state.db()).await {
        Ok(enabled) => enabled,
        Err(err) => {
            // An unreadable flag must not take the whole API down.
            tracing::warn!(error = %err, "Could not read maintenance flag");
            false
        }
    };
    if !enabled {
        return Ok(next.run(req).await);
    }

    let message = SiteSetting::maintenance_message(app_state.db())
        .await
        .ok()
        .flatten()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "The system is under maintenance".to_string());

    match extract_and_insert_auth_user(&app_state, req).await {
        Ok((req, user)) if user.0.is_admin() => Ok(next.run(req).await),
        _ => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error(message)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::maintenance_exempt;
    use axum::http::Method;

    #[test]
    fn login_and_status_paths_are_exempt() {
        assert!(maintenance_exempt(&Method::POST, "/auth/login"));
        assert!(maintenance_exempt(&Method::GET, "/auth/session"));
        assert!(maintenance_exempt(&Method::GET, "/settings/maintenance"));
        assert!(maintenance_exempt(&Method::GET, "/health"));
    }

    #[test]
    fn everything_else_is_gated() {
        assert!(!maintenance_exempt(&Method::GET, "/attendance/records"));
        assert!(!maintenance_exempt(&Method::PUT, "/settings/maintenance"));
        assert!(!maintenance_exempt(&Method::POST, "/auth/logout"));
    }
}
