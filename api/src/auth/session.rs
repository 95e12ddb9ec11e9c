use db::models::user::Role;
use serde::Serialize;

/// The identity resolved from a bearer session token.
///
/// Carried through request extensions by the auth guards so handlers can see
/// who is acting without another database round-trip.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SessionUser {
    /// The `users.id` of the authenticated account.
    pub id: i64,
    /// Access role, checked by the admin guard.
    pub role: Role,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Extractor wrapper that hands the resolved [`SessionUser`] to handlers.
///
/// ```ignore
/// async fn handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     // user.id is the caller
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub SessionUser);
