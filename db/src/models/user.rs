use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::{Rng, thread_rng};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{DomainError, is_unique_violation};

/// Represents a committee user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Securely hashed password string. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Name shown in rosters and reports.
    pub display_name: String,
    /// Organizational department.
    pub department: Department,
    /// Access role.
    pub role: Role,
    /// Inactive users cannot log in and their sessions stop validating.
    pub active: bool,
    /// Current opaque session token, if logged in. Never serialized.
    #[serde(skip_serializing)]
    pub session_token: Option<String>,
    /// When the current session token was issued.
    pub session_issued_at: Option<DateTime<Utc>>,
    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Access role of a user. Backed by a `user_role` enum in the database.
///
/// Only `admin` unlocks management routes; the remaining roles exist for
/// display and for the registration desk workflow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,

    #[sea_orm(string_value = "chairperson")]
    Chairperson,

    #[sea_orm(string_value = "protocol")]
    Protocol,

    #[sea_orm(string_value = "registration_coordinator")]
    RegistrationCoordinator,

    #[sea_orm(string_value = "committee")]
    Committee,
}

/// Organizational department, shared by users and committee members.
/// Backed by a `department` enum in the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "department")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Department {
    #[sea_orm(string_value = "planning")]
    Planning,

    #[sea_orm(string_value = "protocol")]
    Protocol,

    #[sea_orm(string_value = "registration")]
    Registration,

    #[sea_orm(string_value = "publicity")]
    Publicity,

    #[sea_orm(string_value = "general_affairs")]
    GeneralAffairs,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecord,

    #[sea_orm(has_many = "super::participant::Entity")]
    Participant,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecord.def()
    }
}

impl Related<super::participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates a user with a freshly hashed password.
    ///
    /// Returns `ConstraintViolation` when the username is already taken and
    /// `ValidationError` when the password does not meet the policy.
    pub async fn create(
        db: &DbConn,
        username: &str,
        password: &str,
        display_name: &str,
        department: Department,
        role: Role,
    ) -> Result<Model, DomainError> {
        Self::validate_password(password)?;
        let now = Utc::now();
        let user = ActiveModel {
            username: Set(username.trim().to_owned()),
            password_hash: Set(Self::hash_password(password)?),
            display_name: Set(display_name.to_owned()),
            department: Set(department),
            role: Set(role),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        user.insert(db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::ConstraintViolation(format!("Username '{}' is already taken", username.trim()))
            } else {
                DomainError::StorageUnavailable(e)
            }
        })
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_username(db: &DbConn, username: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Username.eq(username.trim()))
            .one(db)
            .await
    }

    /// Resolves a bearer token to its user. Inactive users never match.
    pub async fn find_by_session_token(db: &DbConn, token: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::SessionToken.eq(token))
            .filter(Column::Active.eq(true))
            .one(db)
            .await
    }

    /// Verifies credentials and rotates the session token.
    ///
    /// A missing user, an inactive account, and a wrong password all produce
    /// the same `InvalidCredentials`. On success the stored token is replaced,
    /// which invalidates whatever token the account held before: one active
    /// session per account.
    pub async fn authenticate(
        db: &DbConn,
        username: &str,
        password: &str,
    ) -> Result<Model, DomainError> {
        let user = Self::find_by_username(db, username)
            .await?
            .filter(|u| u.active);

        let user = match user {
            Some(u) if u.verify_password(password) => u,
            _ => return Err(DomainError::InvalidCredentials),
        };

        let mut active: ActiveModel = user.into();
        active.session_token = Set(Some(generate_session_token()));
        active.session_issued_at = Set(Some(Utc::now()));
        active.updated_at = Set(Utc::now());
        Ok(active.update(db).await?)
    }

    /// Returns true only when the user exists, is active, and still holds
    /// exactly the supplied token. Clients poll this to learn that they were
    /// logged in elsewhere.
    pub async fn validate_session(db: &DbConn, user_id: i64, token: &str) -> Result<bool, DbErr> {
        let user = Entity::find_by_id(user_id).one(db).await?;
        Ok(matches!(
            user,
            Some(u) if u.active && u.session_token.as_deref() == Some(token)
        ))
    }

    /// Clears the stored session. Idempotent: logging out an unknown or
    /// already logged-out user succeeds.
    pub async fn logout(db: &DbConn, user_id: i64) -> Result<(), DbErr> {
        let Some(user) = Entity::find_by_id(user_id).one(db).await? else {
            return Ok(());
        };
        let mut active: ActiveModel = user.into();
        active.session_token = Set(None);
        active.session_issued_at = Set(None);
        active.updated_at = Set(Utc::now());
        active.update(db).await?;
        Ok(())
    }

    /// Re-hashes the password after verifying the old one, then clears the
    /// session so the user has to log in again.
    pub async fn change_password(
        db: &DbConn,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let user = Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound("User"))?;

        if !user.verify_password(old_password) {
            return Err(DomainError::InvalidCredentials);
        }
        Self::validate_password(new_password)?;

        let mut active: ActiveModel = user.into();
        active.password_hash = Set(Self::hash_password(new_password)?);
        active.session_token = Set(None);
        active.session_issued_at = Set(None);
        active.updated_at = Set(Utc::now());
        active.update(db).await?;
        Ok(())
    }

    /// Admin-side profile update. Deactivating an account also clears its
    /// session so any live client stops validating immediately.
    pub async fn update_profile(
        db: &DbConn,
        user_id: i64,
        display_name: Option<String>,
        department: Option<Department>,
        role: Option<Role>,
        active: Option<bool>,
    ) -> Result<Model, DomainError> {
        let user = Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound("User"))?;

        let mut am: ActiveModel = user.into();
        if let Some(name) = display_name {
            am.display_name = Set(name);
        }
        if let Some(dep) = department {
            am.department = Set(dep);
        }
        if let Some(role) = role {
            am.role = Set(role);
        }
        if let Some(active_flag) = active {
            am.active = Set(active_flag);
            if !active_flag {
                am.session_token = Set(None);
                am.session_issued_at = Set(None);
            }
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(db).await?)
    }

    pub async fn delete(db: &DbConn, user_id: i64) -> Result<(), DomainError> {
        let res = Entity::delete_by_id(user_id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(DomainError::NotFound("User"));
        }
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn hash_password(password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| DomainError::ValidationError(format!("password hashing failed: {e}")))
    }

    pub fn verify_password(&self, password: &str) -> bool {
        let parsed = match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Password policy: at least 8 characters with an uppercase letter, a
    /// lowercase letter, and a digit.
    pub fn validate_password(password: &str) -> Result<(), DomainError> {
        if password.len() < 8 {
            return Err(DomainError::ValidationError(
                "Password must be at least 8 characters long".into(),
            ));
        }

        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());

        if !has_upper {
            return Err(DomainError::ValidationError(
                "Password must contain at least one uppercase letter".into(),
            ));
        }
        if !has_lower {
            return Err(DomainError::ValidationError(
                "Password must contain at least one lowercase letter".into(),
            ));
        }
        if !has_digit {
            return Err(DomainError::ValidationError(
                "Password must contain at least one number".into(),
            ));
        }
        Ok(())
    }
}

/// Opaque, unpredictable session token: issue time in milliseconds plus two
/// independent random alphanumeric chunks.
fn generate_session_token() -> String {
    let chunk = || {
        thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect::<String>()
    };
    format!("{}.{}.{}", Utc::now().timestamp_millis(), chunk(), chunk())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    async fn seed_user(db: &DbConn) -> Model {
        Model::create(
            db,
            "nthabiseng",
            "Password1",
            "Nthabiseng M.",
            Department::Planning,
            Role::Committee,
        )
        .await
        .expect("failed to create user")
    }

    #[tokio::test]
    async fn authenticate_rotates_the_session_token() {
        let db = setup_test_db().await;
        seed_user(&db).await;

        let first = Model::authenticate(&db, "nthabiseng", "Password1")
            .await
            .unwrap();
        let first_token = first.session_token.clone().unwrap();
        assert!(
            Model::validate_session(&db, first.id, &first_token)
                .await
                .unwrap()
        );

        let second = Model::authenticate(&db, "nthabiseng", "Password1")
            .await
            .unwrap();
        let second_token = second.session_token.clone().unwrap();
        assert_ne!(first_token, second_token);

        // The earlier token no longer validates; the fresh one does.
        assert!(
            !Model::validate_session(&db, first.id, &first_token)
                .await
                .unwrap()
        );
        assert!(
            Model::validate_session(&db, second.id, &second_token)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn authenticate_rejects_wrong_password_unknown_user_and_inactive_account() {
        let db = setup_test_db().await;
        let user = seed_user(&db).await;

        let wrong = Model::authenticate(&db, "nthabiseng", "Password2").await;
        assert!(matches!(wrong, Err(DomainError::InvalidCredentials)));

        let unknown = Model::authenticate(&db, "ghost", "Password1").await;
        assert!(matches!(unknown, Err(DomainError::InvalidCredentials)));

        Model::update_profile(&db, user.id, None, None, None, Some(false))
            .await
            .unwrap();
        let inactive = Model::authenticate(&db, "nthabiseng", "Password1").await;
        assert!(matches!(inactive, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn logout_clears_the_token_and_is_idempotent() {
        let db = setup_test_db().await;
        seed_user(&db).await;

        let user = Model::authenticate(&db, "nthabiseng", "Password1")
            .await
            .unwrap();
        let token = user.session_token.clone().unwrap();

        Model::logout(&db, user.id).await.unwrap();
        assert!(!Model::validate_session(&db, user.id, &token).await.unwrap());

        // Second logout (and logout of a user that never existed) still succeed.
        Model::logout(&db, user.id).await.unwrap();
        Model::logout(&db, 9999).await.unwrap();
    }

    #[tokio::test]
    async fn deactivating_a_user_invalidates_their_session() {
        let db = setup_test_db().await;
        seed_user(&db).await;

        let user = Model::authenticate(&db, "nthabiseng", "Password1")
            .await
            .unwrap();
        let token = user.session_token.clone().unwrap();

        Model::update_profile(&db, user.id, None, None, None, Some(false))
            .await
            .unwrap();
        assert!(!Model::validate_session(&db, user.id, &token).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let db = setup_test_db().await;
        seed_user(&db).await;

        let dup = Model::create(
            &db,
            "nthabiseng",
            "Password1",
            "Someone Else",
            Department::Protocol,
            Role::Protocol,
        )
        .await;
        assert!(matches!(dup, Err(DomainError::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn change_password_requires_the_old_one_and_enforces_the_policy() {
        let db = setup_test_db().await;
        let user = seed_user(&db).await;

        let bad_old = Model::change_password(&db, user.id, "Password2", "NewPassword1").await;
        assert!(matches!(bad_old, Err(DomainError::InvalidCredentials)));

        let weak = Model::change_password(&db, user.id, "Password1", "short").await;
        assert!(matches!(weak, Err(DomainError::ValidationError(_))));

        Model::change_password(&db, user.id, "Password1", "NewPassword1")
            .await
            .unwrap();
        assert!(
            Model::authenticate(&db, "nthabiseng", "NewPassword1")
                .await
                .is_ok()
        );
    }

    #[test]
    fn session_tokens_have_three_segments_and_do_not_repeat() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
        assert_eq!(a.split('.').count(), 3);
    }
}
