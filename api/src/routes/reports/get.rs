use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use util::state::AppState;
use validator::Validate;

use crate::response::{ApiResponse, domain_error_response};
use crate::routes::attendance::common::{RosterEntry, roster_csv};
use crate::routes::reports::common::{AttendanceReportResponse, REPORT_PAGE_SIZE, ReportQuery};
use db::error::DomainError;
use db::models::attendance_record::Model as Record;

/// GET /api/reports/attendance
///
/// The daily attendance report: roster-join rows for a date with server-side
/// filtering and pagination, plus aggregate stats for the whole date
/// (filters never change the stats).
///
/// ### Query Parameters
/// - `date` (optional): report date, defaults to today (UTC)
/// - `department` (optional): exact department, e.g. `planning`
/// - `status` (optional): `attend` | `absent` | `unmarked`
/// - `query` (optional): case-insensitive match on member name or department
/// - `page` (optional): page number (default 1)
/// - `per_page` (optional): rows per page (default 6, the printed grid size;
///   max 100)
pub async fn attendance_report(
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(common::format_validation_errors(
                &e,
            ))),
        )
            .into_response();
    }

    let db = app_state.db();
    let date = query.date_or_today();

    let rows = match Record::for_date(db, date).await {
        Ok(rows) => rows,
        Err(err) => return domain_error_response::<()>(DomainError::from(err)).into_response(),
    };
    let stats = match Record::stats_for_date(db, date).await {
        Ok(stats) => stats,
        Err(err) => return domain_error_response::<()>(DomainError::from(err)).into_response(),
    };

    let filtered: Vec<_> = rows
        .into_iter()
        .filter(|(member, record)| query.matches(member, record.as_ref()))
        .collect();

    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(REPORT_PAGE_SIZE);
    let total = filtered.len() as u64;

    let rows: Vec<RosterEntry> = filtered
        .into_iter()
        .skip(((page - 1) * per_page) as usize)
        .take(per_page as usize)
        .map(|(member, record)| RosterEntry { member, record })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            AttendanceReportResponse {
                date,
                rows,
                page,
                per_page,
                total,
                stats,
            },
            "Attendance report retrieved",
        )),
    )
        .into_response()
}

/// GET /api/reports/attendance/export
///
/// CSV export of the filtered report rows. Takes the same filters as
/// `GET /reports/attendance` but no pagination: every matching row lands in
/// the file.
pub async fn export_report_csv(
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> (StatusCode, (HeaderMap, String)) {
    let date = query.date_or_today();

    let rows = match Record::for_date(app_state.db(), date).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!(error = %err, "Report export failed");
            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                (headers, "error".to_string()),
            );
        }
    };

    let filtered: Vec<_> = rows
        .into_iter()
        .filter(|(member, record)| query.matches(member, record.as_ref()))
        .collect();

    let csv = roster_csv(date, &filtered);
    let filename = format!("attendance_report_{}.csv", date.format("%Y-%m-%d"));

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
            .unwrap_or(HeaderValue::from_static("attachment")),
    );

    (StatusCode::OK, (headers, csv))
}
