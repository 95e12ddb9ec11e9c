use db::models::user::Department;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateCommitteeMemberRequest {
    #[validate(length(min = 1, max = 128, message = "Name is required"))]
    pub name: String,

    pub department: Department,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct UpdateCommitteeMemberRequest {
    pub name: Option<String>,
    pub department: Option<Department>,
}
