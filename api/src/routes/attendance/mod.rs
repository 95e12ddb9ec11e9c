//! # Attendance Routes Module
//!
//! This module defines and wires up routes for the `/api/attendance` endpoint
//! group: daily check-in marking, the per-date roster view, aggregate stats,
//! stored photo retrieval, and CSV export.
//!
//! ## Structure
//! - `common.rs` — request/response DTOs shared by the handlers
//! - `get.rs` — GET handlers (roster, stats, photos, export)
//! - `post.rs` — POST handlers (mark attendance)
//!
//! ## Middleware
//! Every route here requires a live session; `allow_authenticated` is layered
//! on in the route table.

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

use get::{daily_stats, export_records_csv, get_photo, list_records};
use post::mark_attendance;

pub mod common;
pub mod get;
pub mod post;

/// Builds the `/attendance` route group, mapping HTTP methods to handlers.
///
/// - `POST /attendance/records` → `mark_attendance`
/// - `GET /attendance/records` → `list_records`
/// - `GET /attendance/stats` → `daily_stats`
/// - `GET /attendance/export` → `export_records_csv`
/// - `GET /attendance/photos/{date}/{filename}` → `get_photo`
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(list_records))
        .route("/records", post(mark_attendance))
        .route("/stats", get(daily_stats))
        .route("/export", get(export_records_csv))
        .route("/photos/{*key}", get(get_photo))
}
