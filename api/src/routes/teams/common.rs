use db::models::participant::Model as Participant;
use db::models::team::Model as Team;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 64, message = "Team name is required"))]
    pub name: String,
}

/// One team with its current roster.
#[derive(Debug, Serialize)]
pub struct TeamWithMembers {
    pub team: Team,
    pub member_count: u64,
    pub members: Vec<Participant>,
}

#[derive(Debug, Serialize, Default)]
pub struct TeamsListResponse {
    pub teams: Vec<TeamWithMembers>,
    pub total_participants: u64,
}
