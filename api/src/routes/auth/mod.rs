//! # auth Routes Module
//!
//! This module defines and wires up routes for the `/auth` endpoint group.
//!
//! ## Structure
//! - `post.rs` — POST handlers (login, logout, change password)
//! - `get.rs` — GET handlers (session polling)
//!
//! ## Usage
//! The `auth_routes()` function returns a `Router` which is nested under
//! `/auth` in the main application.

pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;
use get::session_status;
use post::{change_password, login, logout};

/// Builds the `/auth` route group, mapping HTTP methods to handlers.
///
/// - `POST /auth/login` → `login` (public)
/// - `GET /auth/session` → `session_status` (public; the token travels in the
///   query so a stale one can still be checked)
/// - `POST /auth/logout` → `logout` (authenticated)
/// - `POST /auth/change-password` → `change_password` (authenticated)
///
/// # Returns
/// A configured `Router` instance to be nested in the main app.
pub fn auth_routes(app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/change-password", post(change_password))
        .route_layer(from_fn_with_state(app_state, allow_authenticated));

    Router::new()
        .route("/login", post(login))
        .route("/session", get(session_status))
        .merge(protected)
}
