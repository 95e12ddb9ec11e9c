use crate::response::{ApiResponse, domain_error_response};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::error::DomainError;
use db::models::committee_member::{
    Column as MemberColumn, Entity as MemberEntity, Model as Member,
};
use db::models::user::Department;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ListMembersQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub department: Option<Department>,
}

#[derive(Debug, Serialize)]
pub struct MembersListResponse {
    pub members: Vec<Member>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/committee-members
///
/// Paginated roster listing with optional filters. Requires admin privileges.
///
/// ### Query Parameters
/// - `page` / `per_page` — pagination (defaults 1 / 20, per_page capped at 100)
/// - `query` — partial name match
/// - `department` — exact department, e.g. `publicity`
/// - `sort` — comma-separated fields (`name`, `department`, `created_at`),
///   `-` prefix for descending; defaults to name ascending
pub async fn list_committee_members(
    State(app_state): State<AppState>,
    Query(query): Query<ListMembersQuery>,
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
        condition = condition.add(MemberColumn::Name.contains(q));
    }
    if let Some(department) = query.department {
        condition = condition.add(MemberColumn::Department.eq(department));
    }

    let mut query_builder = MemberEntity::find().filter(condition);

    if let Some(sort_param) = &query.sort {
        for sort_field in sort_param.split(',') {
            let (field, desc) = if let Some(stripped) = sort_field.strip_prefix('-') {
                (stripped, true)
            } else {
                (sort_field, false)
            };

            let column = match field {
                "name" => MemberColumn::Name,
                "department" => MemberColumn::Department,
                "created_at" => MemberColumn::CreatedAt,
                _ => continue,
            };
            query_builder = if desc {
                query_builder.order_by_desc(column)
            } else {
                query_builder.order_by_asc(column)
            };
        }
    } else {
        query_builder = query_builder.order_by_asc(MemberColumn::Name);
    }

    let paginator = query_builder.paginate(db, per_page);
    let total = match paginator.num_items().await {
        Ok(total) => total,
        Err(err) => return domain_error_response::<()>(DomainError::from(err)).into_response(),
    };
    let members = match paginator.fetch_page(page.saturating_sub(1)).await {
        Ok(members) => members,
        Err(err) => return domain_error_response::<()>(DomainError::from(err)).into_response(),
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            MembersListResponse {
                members,
                page,
                per_page,
                total,
            },
            "Committee members retrieved successfully",
        )),
    )
        .into_response()
}

/// GET /api/committee-members/{member_id}
///
/// Fetch one roster entry. Requires admin privileges.
pub async fn get_committee_member(
    State(app_state): State<AppState>,
    Path(member_id): Path<i64>,
) -> impl IntoResponse {
    match Member::find_by_id(app_state.db(), member_id).await {
        Ok(Some(member)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                member,
                "Committee member retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => {
            domain_error_response::<()>(DomainError::NotFound("Committee member")).into_response()
        }
        Err(err) => domain_error_response::<()>(DomainError::from(err)).into_response(),
    }
}
