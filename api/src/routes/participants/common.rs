use db::models::participant::Model as Participant;
use db::models::team::Model as Team;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterParticipantRequest {
    #[validate(length(min = 1, max = 128, message = "Participant name is required"))]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveParticipantRequest {
    pub team_id: i64,
}

/// Registration outcome: the new participant and the team they landed in.
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub participant: Participant,
    pub team: Team,
}
