//! # Users Routes Module
//!
//! This module defines and wires up routes for the `/api/users` endpoint group.
//!
//! ## Structure
//! - `get.rs` — GET handlers (list users, fetch one)
//! - `post.rs` — POST handlers (create user)
//! - `put.rs` — PUT handlers (update user)
//! - `delete.rs` — DELETE handlers (delete user)
//!
//! ## Middleware
//! The whole group is admin-only; `allow_admin` is layered on in the route
//! table.
//!
//! ## Usage
//! The `users_routes()` function returns a `Router` which is nested under
//! `/users` in the main application.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use delete::delete_user;
use get::{get_user, list_users};
use post::create_user;
use put::update_user;
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/users` route group, mapping HTTP methods to handlers.
///
/// - `GET /users` → `list_users` (admin only)
/// - `POST /users` → `create_user` (admin only)
/// - `GET /users/{user_id}` → `get_user` (admin only)
/// - `PUT /users/{user_id}` → `update_user` (admin only)
/// - `DELETE /users/{user_id}` → `delete_user` (admin only)
///
/// # Returns
/// A configured `Router` instance to be nested in the main app.
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user))
        .route("/{user_id}", get(get_user))
        .route("/{user_id}", put(update_user))
        .route("/{user_id}", delete(delete_user))
}
