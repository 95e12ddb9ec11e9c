use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use util::state::AppState;

use crate::response::{ApiResponse, domain_error_response};
use db::error::DomainError;
use db::models::site_setting::Model as SiteSetting;

#[derive(Debug, Serialize, Default)]
pub struct MaintenanceSettings {
    pub enabled: bool,
    pub message: String,
}

/// GET /api/settings/maintenance
///
/// Current maintenance state. Public: clients poll this to decide whether to
/// show the maintenance banner, including before login. Missing keys read as
/// disabled with an empty message.
pub async fn get_maintenance(
    State(app_state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<MaintenanceSettings>>) {
    let db = app_state.db();

    let enabled = match SiteSetting::maintenance_mode(db).await {
        Ok(enabled) => enabled,
        Err(err) => return domain_error_response(DomainError::from(err)),
    };
    let message = match SiteSetting::maintenance_message(db).await {
        Ok(message) => message.unwrap_or_default(),
        Err(err) => return domain_error_response(DomainError::from(err)),
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            MaintenanceSettings { enabled, message },
            "Maintenance settings retrieved",
        )),
    )
}
