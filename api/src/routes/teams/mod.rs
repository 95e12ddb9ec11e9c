//! # Teams Routes Module
//!
//! This module defines and wires up routes for the `/api/teams` endpoint
//! group: listing teams with their rosters, creating teams, and deleting a
//! team together with its participants.
//!
//! ## Middleware
//! Listing requires a session; create and delete are admin-only, layered per
//! route here.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use util::state::AppState;

use crate::auth::guards::allow_admin;
use delete::delete_team;
use get::list_teams;
use post::create_team;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

/// Builds the `/teams` route group.
///
/// - `GET /teams` → `list_teams` (authenticated)
/// - `POST /teams` → `create_team` (admin only)
/// - `DELETE /teams/{team_id}` → `delete_team` (admin only)
pub fn teams_routes(app_state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_team))
        .route("/{team_id}", delete(delete_team))
        .route_layer(from_fn_with_state(app_state, allow_admin));

    Router::new().route("/", get(list_teams)).merge(admin)
}
