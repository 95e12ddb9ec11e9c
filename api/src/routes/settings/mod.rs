//! # Settings Routes Module
//!
//! Site-wide switches, currently just maintenance mode. Reading is public so
//! clients can show the banner before anyone signs in; writing is admin-only.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, put},
};
use util::state::AppState;

use crate::auth::guards::allow_admin;
use get::get_maintenance;
use put::update_maintenance;

pub mod get;
pub mod put;

/// Builds the `/settings` route group.
///
/// - `GET /settings/maintenance` → `get_maintenance` (public)
/// - `PUT /settings/maintenance` → `update_maintenance` (admin only)
pub fn settings_routes(app_state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/maintenance", put(update_maintenance))
        .route_layer(from_fn_with_state(app_state, allow_admin));

    Router::new()
        .route("/maintenance", get(get_maintenance))
        .merge(admin)
}
