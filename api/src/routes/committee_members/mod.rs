//! # Committee Members Routes Module
//!
//! This module defines and wires up routes for the `/api/committee-members`
//! endpoint group: the roster of people whose daily attendance gets tracked.
//! Roster rows are not login accounts; those live under `/api/users`.
//!
//! ## Structure
//! - `get.rs` — GET handlers (list members, fetch one)
//! - `post.rs` — POST handlers (create member)
//! - `put.rs` — PUT handlers (update member)
//! - `delete.rs` — DELETE handlers (delete member)
//!
//! ## Middleware
//! The whole group is admin-only; `allow_admin` is layered on in the route
//! table.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use delete::delete_committee_member;
use get::{get_committee_member, list_committee_members};
use post::create_committee_member;
use put::update_committee_member;
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/committee-members` route group.
///
/// - `GET /committee-members` → `list_committee_members` (admin only)
/// - `POST /committee-members` → `create_committee_member` (admin only)
/// - `GET /committee-members/{member_id}` → `get_committee_member` (admin only)
/// - `PUT /committee-members/{member_id}` → `update_committee_member` (admin only)
/// - `DELETE /committee-members/{member_id}` → `delete_committee_member` (admin only)
pub fn committee_members_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_committee_members))
        .route("/", post(create_committee_member))
        .route("/{member_id}", get(get_committee_member))
        .route("/{member_id}", put(update_committee_member))
        .route("/{member_id}", delete(delete_committee_member))
}
