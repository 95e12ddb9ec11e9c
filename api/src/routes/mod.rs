//! HTTP route entry point for `/api/...`.
//!
//! This module defines all HTTP entry points under the `/api` namespace.
//! Routes are organized by domain (e.g., authentication, attendance, teams,
//! reports, health), each protected via appropriate access control middleware.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Authentication endpoints (login, session polling, public)
//! - `/users` → Login account management (admin-only)
//! - `/committee-members` → Attendance roster management (admin-only)
//! - `/attendance` → Daily attendance marking, stats, photos, CSV export
//! - `/teams` / `/participants` → Team rosters and participant registration
//! - `/reports` → Printable attendance report projections
//! - `/settings` → Maintenance flag (read public, write admin)

use crate::auth::guards::{allow_admin, allow_authenticated};
use crate::routes::{
    attendance::attendance_routes, auth::auth_routes,
    committee_members::committee_members_routes, health::health_routes,
    participants::participants_routes, reports::reports_routes, settings::settings_routes,
    teams::teams_routes, users::users_routes,
};
use axum::{Router, middleware::from_fn_with_state};
use util::state::AppState;

pub mod attendance;
pub mod auth;
pub mod committee_members;
pub mod health;
pub mod participants;
pub mod reports;
pub mod settings;
pub mod teams;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router has `AppState` as its state type and mounts
/// all core API routes under their respective base paths.
///
/// # Route Structure:
/// - `/health` → Health check endpoint (no authentication required).
/// - `/auth` → Login, session polling, logout, password change.
/// - `/users` → Login account management (restricted to admins via `allow_admin`).
/// - `/committee-members` → Roster management (admin-only).
/// - `/attendance` → Marking, roster reads, stats, photo serving, CSV export
///   (requires authentication).
/// - `/teams` → Team listing for all authenticated users; create/delete admin.
/// - `/participants` → Registration for any authenticated user; moves and
///   deletes admin.
/// - `/reports` → Attendance report projections (requires authentication).
/// - `/settings` → Maintenance flag; reads are public so clients can show the
///   banner before login, writes are admin.
pub fn routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes(app_state.clone()))
        .nest(
            "/users",
            users_routes().route_layer(from_fn_with_state(app_state.clone(), allow_admin)),
        )
        .nest(
            "/committee-members",
            committee_members_routes()
                .route_layer(from_fn_with_state(app_state.clone(), allow_admin)),
        )
        .nest(
            "/attendance",
            attendance_routes()
                .route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .nest(
            "/teams",
            teams_routes(app_state.clone())
                .route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .nest(
            "/participants",
            participants_routes(app_state.clone())
                .route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .nest(
            "/reports",
            reports_routes()
                .route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .nest("/settings", settings_routes(app_state.clone()))
        .with_state(app_state)
}
