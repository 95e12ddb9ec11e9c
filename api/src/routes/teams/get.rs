use axum::{Json, extract::State, http::StatusCode};
use std::collections::HashMap;
use util::state::AppState;

use crate::response::{ApiResponse, domain_error_response};
use crate::routes::teams::common::{TeamWithMembers, TeamsListResponse};
use db::error::DomainError;
use db::models::participant::Model as Participant;
use db::models::team::Model as Team;

/// GET /api/teams
///
/// All teams (ordered by id, so "Team 1" through "Team 8" come out in
/// creation order) with their member counts and full rosters. Requires a
/// session.
pub async fn list_teams(
    State(app_state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<TeamsListResponse>>) {
    let db = app_state.db();

    let teams = match Team::find_all(db).await {
        Ok(teams) => teams,
        Err(err) => return domain_error_response(DomainError::from(err)),
    };
    let participants = match Participant::find_all(db).await {
        Ok(participants) => participants,
        Err(err) => return domain_error_response(DomainError::from(err)),
    };

    let total_participants = participants.len() as u64;
    let mut by_team: HashMap<i64, Vec<Participant>> = HashMap::new();
    for p in participants {
        if let Some(team_id) = p.team_id {
            by_team.entry(team_id).or_default().push(p);
        }
    }

    let teams = teams
        .into_iter()
        .map(|team| {
            let members = by_team.remove(&team.id).unwrap_or_default();
            TeamWithMembers {
                member_count: members.len() as u64,
                members,
                team,
            }
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            TeamsListResponse {
                teams,
                total_participants,
            },
            "Teams retrieved successfully",
        )),
    )
}
