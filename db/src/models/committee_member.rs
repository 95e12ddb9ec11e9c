use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

use super::user::Department;
use crate::error::DomainError;

/// A person on the committee roster. Independent of login accounts: most
/// members never log in, they only get marked present or absent.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "committee_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,
    pub department: Department,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecord,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        name: &str,
        department: Department,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let member = ActiveModel {
            name: Set(name.to_owned()),
            department: Set(department),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        member.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Full roster, ordered by name for stable display.
    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Name).all(db).await
    }

    pub async fn update(
        db: &DbConn,
        id: i64,
        name: Option<String>,
        department: Option<Department>,
    ) -> Result<Model, DomainError> {
        let member = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound("Committee member"))?;

        let mut am: ActiveModel = member.into();
        if let Some(name) = name {
            am.name = Set(name);
        }
        if let Some(department) = department {
            am.department = Set(department);
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(db).await?)
    }

    /// Deletes the member together with their attendance rows (FK cascade).
    pub async fn delete(db: &DbConn, id: i64) -> Result<(), DomainError> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(DomainError::NotFound("Committee member"));
        }
        Ok(())
    }
}
