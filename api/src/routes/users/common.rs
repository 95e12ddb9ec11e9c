use db::models::user::{Department, Role};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,

    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,

    pub department: Department,
    pub role: Role,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct UpdateUserRequest {
    pub display_name: Option<String>,
    pub department: Option<Department>,
    pub role: Option<Role>,
    pub active: Option<bool>,
}
