use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use util::state::AppState;

use crate::response::{ApiResponse, domain_error_response};
use db::error::DomainError;
use db::models::site_setting::Model as SiteSetting;

use super::get::MaintenanceSettings;

#[derive(Debug, Deserialize)]
pub struct UpdateMaintenanceRequest {
    pub enabled: bool,
    #[serde(default)]
    pub message: String,
}

/// PUT /api/settings/maintenance
///
/// Turns the maintenance banner on or off and stores the banner text. Both
/// keys are written on every call so a later GET always sees a consistent
/// pair. Admin only.
///
/// ### Request Body
/// ```json
/// {
///   "enabled": true,
///   "message": "Back after the venue changeover"
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the stored settings
/// - `503 Service Unavailable` if the settings store cannot be reached
pub async fn update_maintenance(
    State(app_state): State<AppState>,
    Json(req): Json<UpdateMaintenanceRequest>,
) -> (StatusCode, Json<ApiResponse<MaintenanceSettings>>) {
    let db = app_state.db();

    match SiteSetting::set_maintenance(db, req.enabled, Some(&req.message)).await {
        Ok(()) => {
            tracing::info!(enabled = req.enabled, "maintenance mode updated");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    MaintenanceSettings {
                        enabled: req.enabled,
                        message: req.message,
                    },
                    "Maintenance settings updated",
                )),
            )
        }
        Err(err) => domain_error_response(DomainError::from(err)),
    }
}
