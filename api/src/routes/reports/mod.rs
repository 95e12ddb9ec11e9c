//! # Reports Routes Module
//!
//! Read-only projections over the attendance ledger for the printable daily
//! report: server-side filtering, pagination sized to the printed grid, and
//! a CSV export of the filtered rows.
//!
//! ## Middleware
//! Requires a session; layered on in the route table.

use axum::{Router, routing::get};
use util::state::AppState;

use get::{attendance_report, export_report_csv};

pub mod common;
pub mod get;

/// Builds the `/reports` route group.
///
/// - `GET /reports/attendance` → `attendance_report` (authenticated)
/// - `GET /reports/attendance/export` → `export_report_csv` (authenticated)
pub fn reports_routes() -> Router<AppState> {
    Router::new()
        .route("/attendance", get(attendance_report))
        .route("/attendance/export", get(export_report_csv))
}
