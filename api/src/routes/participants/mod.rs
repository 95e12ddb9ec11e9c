//! # Participants Routes Module
//!
//! This module defines and wires up routes for the `/api/participants`
//! endpoint group: registration-desk sign-up with automatic team assignment,
//! manual moves, and removal.
//!
//! ## Middleware
//! Registration is open to any signed-in user (the registration desk); the
//! move and delete routes are admin-only.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, post, put},
};
use util::state::AppState;

use crate::auth::guards::allow_admin;
use delete::delete_participant;
use post::register_participant;
use put::move_participant;

pub mod common;
pub mod delete;
pub mod post;
pub mod put;

/// Builds the `/participants` route group.
///
/// - `POST /participants` → `register_participant` (authenticated)
/// - `PUT /participants/{participant_id}/team` → `move_participant` (admin only)
/// - `DELETE /participants/{participant_id}` → `delete_participant` (admin only)
pub fn participants_routes(app_state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/{participant_id}/team", put(move_participant))
        .route("/{participant_id}", delete(delete_participant))
        .route_layer(from_fn_with_state(app_state, allow_admin));

    Router::new()
        .route("/", post(register_participant))
        .merge(admin)
}
