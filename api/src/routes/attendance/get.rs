use axum::{
    Json,
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use mime_guess::from_path;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use util::state::AppState;

use crate::response::{ApiResponse, domain_error_response};
use crate::routes::attendance::common::{DateQuery, RosterEntry, RosterResponse, roster_csv};
use crate::services::photo_storage::PhotoStorage;
use db::error::DomainError;
use db::models::attendance_record::{DailyStats, Model as Record};

/// GET /api/attendance/records?date=
///
/// The roster join for a date: every committee member exactly once, paired
/// with their attendance record when one exists. Members without a record
/// come back with `record: null` and count as absent.
///
/// `date` defaults to today (UTC) when omitted.
pub async fn list_records(
    State(app_state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> (StatusCode, Json<ApiResponse<Option<RosterResponse>>>) {
    let date = query.date_or_today();

    match Record::for_date(app_state.db(), date).await {
        Ok(rows) => {
            let entries = rows
                .into_iter()
                .map(|(member, record)| RosterEntry { member, record })
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    Some(RosterResponse { date, entries }),
                    "Attendance records retrieved",
                )),
            )
        }
        Err(err) => domain_error_response(DomainError::from(err)),
    }
}

/// GET /api/attendance/stats?date=
///
/// Aggregate figures for a date. `absent` counts every member without an
/// `attend` row, so unmarked members are included. `rate` is the attendance
/// percentage rounded to the nearest whole number, 0 for an empty roster.
pub async fn daily_stats(
    State(app_state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> (StatusCode, Json<ApiResponse<DailyStats>>) {
    let date = query.date_or_today();

    match Record::stats_for_date(app_state.db(), date).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(stats, "Attendance stats retrieved")),
        ),
        Err(err) => domain_error_response(DomainError::from(err)),
    }
}

/// GET /api/attendance/photos/{date}/{filename}
///
/// Streams a stored check-in photo. The key is exactly the tail of the URL
/// the record carries in `photo_url`; anything that tries to walk out of the
/// photo directory is answered with 404.
pub async fn get_photo(Path(key): Path<String>) -> impl IntoResponse {
    let Some(path) = PhotoStorage::resolve(&key) else {
        return (StatusCode::NOT_FOUND, "Photo not found").into_response();
    };

    match File::open(&path).await {
        Ok(file) => {
            let stream = ReaderStream::new(file);
            let content_type = from_path(&path).first_or_octet_stream();

            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type.as_ref())
                .body(Body::from_stream(stream))
                .unwrap()
        }
        Err(_) => (StatusCode::NOT_FOUND, "Photo not found").into_response(),
    }
}

/// GET /api/attendance/export?date=
///
/// Export the roster join for a date as a CSV file.
///
/// **Response**: `text/csv` attachment with columns:
/// `member_id,name,department,date,status,check_in_time,address`
///
/// Members without a record appear with status `unmarked` and empty detail
/// columns, keeping explicit and implicit absence distinguishable in the
/// export.
pub async fn export_records_csv(
    State(app_state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> (StatusCode, (HeaderMap, String)) {
    let date = query.date_or_today();

    let rows = match Record::for_date(app_state.db(), date).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!(error = %err, "Attendance export failed");
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

    let csv = roster_csv(date, &rows);
    let filename = format!("attendance_{}.csv", date.format("%Y-%m-%d"));

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
