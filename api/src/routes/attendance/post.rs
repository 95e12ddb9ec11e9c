use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, domain_error_response};
use crate::routes::attendance::common::MarkAttendanceRequest;
use crate::services::photo_storage::PhotoStorage;
use db::error::DomainError;
use db::models::attendance_record::{Location, Model as Record};

/// POST /api/attendance/records
///
/// Marks attendance for one committee member on one date, as the calling
/// user. Marking the same member and date again updates the existing row in
/// place; there is never more than one row per (member, date).
///
/// When `photo_data` is present it is decoded and stored first, and the
/// resulting URL lands on the record. A photo from an earlier mark that got
/// replaced (or dropped, when re-marking absent) is deleted from disk.
///
/// ### Request Body
/// ```json
/// {
///   "committee_member_id": 3,
///   "date": "2026-08-22",
///   "status": "attend",
///   "photo_data": "data:image/jpeg;base64,/9j/4AAQ...",
///   "latitude": -25.7479,
///   "longitude": 28.2293,
///   "accuracy": 12.5,
///   "address": "Pretoria Showgrounds, Hall B"
/// }
/// ```
///
/// ### Responses
/// - `200 OK` — the stored record.
/// - `400 Bad Request` — invalid payload or undecodable photo.
/// - `404 Not Found` — unknown committee member.
pub async fn mark_attendance(
    State(app_state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Json(req): Json<MarkAttendanceRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(common::format_validation_errors(
                &e,
            ))),
        )
            .into_response();
    }

    let db = app_state.db();

    // Capture the photo of any existing mark before writing, so the replaced
    // file can be removed once the new row is in.
    let previous_photo =
        match Record::find_for_member_and_date(db, req.committee_member_id, req.date).await {
            Ok(previous) => previous.and_then(|r| r.photo_url),
            Err(err) => return domain_error_response::<()>(DomainError::from(err)).into_response(),
        };

    let photo_url = match &req.photo_data {
        Some(data) => match PhotoStorage::save(req.date, req.committee_member_id, data) {
            Ok(url) => Some(url),
            Err(err) => return domain_error_response::<()>(err).into_response(),
        },
        None => None,
    };
    let stored_photo = photo_url.clone();

    let location = match (req.latitude, req.longitude) {
        (Some(latitude), Some(longitude)) => Some(Location {
            latitude,
            longitude,
            accuracy: req.accuracy,
            address: req.address.clone(),
        }),
        _ => None,
    };

    match Record::mark(
        db,
        req.committee_member_id,
        req.date,
        req.status,
        photo_url,
        location,
        Some(caller.id),
    )
    .await
    {
        Ok(record) => {
            if let Some(old) = previous_photo {
                if record.photo_url.as_deref() != Some(old.as_str()) {
                    PhotoStorage::remove(&old);
                }
            }
            tracing::info!(
                committee_member_id = req.committee_member_id,
                date = %req.date,
                status = %req.status,
                marked_by = caller.id,
                "Attendance recorded"
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success(record, "Attendance recorded")),
            )
                .into_response()
        }
        Err(err) => {
            // The ledger write failed after the photo hit disk; drop the
            // orphaned file.
            if let Some(url) = stored_photo {
                PhotoStorage::remove(&url);
            }
            domain_error_response::<()>(err).into_response()
        }
    }
}
