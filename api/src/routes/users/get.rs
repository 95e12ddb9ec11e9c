use crate::response::{ApiResponse, domain_error_response};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::error::DomainError;
use db::models::user::{
    Column as UserColumn, Department, Entity as UserEntity, Model as UserModel, Role,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub username: Option<String>,
    pub department: Option<Department>,
    pub role: Option<Role>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub users: Vec<UserModel>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/users
///
/// Retrieve a paginated list of committee accounts with optional filtering
/// and sorting. Requires admin privileges.
///
/// ### Query Parameters
/// - `page` (optional): Page number (default: 1, min: 1)
/// - `per_page` (optional): Items per page (default: 20, min: 1, max: 100)
/// - `query` (optional): Case-insensitive partial match against username OR display name
/// - `username` (optional): Partial match on username
/// - `department` (optional): Exact department, e.g. `planning`
/// - `role` (optional): Exact role, e.g. `registration_coordinator`
/// - `active` (optional): Filter by active flag (true/false)
/// - `sort` (optional): Comma-separated sort fields. Use `-` prefix for descending
///
/// ### Examples
/// ```http
/// GET /api/users?page=2&per_page=10
/// GET /api/users?query=thandi
/// GET /api/users?department=protocol&active=true
/// GET /api/users?sort=username,-created_at
/// ```
///
/// ### Responses
/// - `200 OK` — `data` carries `{ users, page, per_page, total }`.
/// - `400 Bad Request` - Invalid query parameters
/// - `401 Unauthorized` - Missing or invalid session token
/// - `403 Forbidden` - Authenticated but not admin
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(common::format_validation_errors(
                &e,
            ))),
        )
            .into_response();
    }

    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(20);

    let mut condition = Condition::all();

    if let Some(q) = &query.query {
        condition = condition.add(
            Condition::any()
                .add(UserColumn::Username.contains(q))
                .add(UserColumn::DisplayName.contains(q)),
        );
    }

    if let Some(username) = &query.username {
        condition = condition.add(UserColumn::Username.contains(username));
    }

    if let Some(department) = query.department {
        condition = condition.add(UserColumn::Department.eq(department));
    }

    if let Some(role) = query.role {
        condition = condition.add(UserColumn::Role.eq(role));
    }

    if let Some(active) = query.active {
        condition = condition.add(UserColumn::Active.eq(active));
    }

    let mut query_builder = UserEntity::find().filter(condition);

    if let Some(sort_param) = &query.sort {
        for sort_field in sort_param.split(',') {
            let (field, desc) = if let Some(stripped) = sort_field.strip_prefix('-') {
                (stripped, true)
            } else {
                (sort_field, false)
            };

            let column = match field {
                "username" => UserColumn::Username,
                "display_name" => UserColumn::DisplayName,
                "department" => UserColumn::Department,
                "role" => UserColumn::Role,
                "active" => UserColumn::Active,
                "created_at" => UserColumn::CreatedAt,
                _ => continue,
            };
            query_builder = if desc {
                query_builder.order_by_desc(column)
            } else {
                query_builder.order_by_asc(column)
            };
        }
    } else {
        query_builder = query_builder.order_by_asc(UserColumn::Id);
    }

    let paginator = query_builder.paginate(db, per_page);
    let total = match paginator.num_items().await {
        Ok(total) => total,
        Err(err) => return domain_error_response::<()>(DomainError::from(err)).into_response(),
    };
    let users = match paginator.fetch_page(page.saturating_sub(1)).await {
        Ok(users) => users,
        Err(err) => return domain_error_response::<()>(DomainError::from(err)).into_response(),
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            UsersListResponse {
                users,
                page,
                per_page,
                total,
            },
            "Users retrieved successfully",
        )),
    )
        .into_response()
}

/// GET /api/users/{user_id}
///
/// Fetch a single account by ID. Requires admin privileges.
///
/// ### Responses
/// - `200 OK` — the user object (password hash and token are never serialized).
/// - `404 Not Found`
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    match UserModel::find_by_id(app_state.db(), user_id).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(user, "User retrieved successfully")),
        )
            .into_response(),
        Ok(None) => domain_error_response::<()>(DomainError::NotFound("User")).into_response(),
        Err(err) => domain_error_response::<()>(DomainError::from(err)).into_response(),
    }
}
