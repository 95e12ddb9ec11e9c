use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Simple key-value store for site-wide flags. Currently carries the
/// maintenance switch and its banner message.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,

    pub value: String,

    pub updated_at: DateTime<Utc>,
}

pub const MAINTENANCE_MODE: &str = "maintenance_mode";
pub const MAINTENANCE_MESSAGE: &str = "maintenance_message";

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn get(db: &DbConn, key: &str) -> Result<Option<String>, DbErr> {
        Ok(Entity::find_by_id(key).one(db).await?.map(|s| s.value))
    }

    /// Inserts the key or overwrites its value.
    pub async fn set(db: &DbConn, key: &str, value: &str) -> Result<Model, DbErr> {
        let now = Utc::now();
        match Entity::find_by_id(key).one(db).await? {
            Some(existing) => {
                let mut am: ActiveModel = existing.into();
                am.value = Set(value.to_owned());
                am.updated_at = Set(now);
                am.update(db).await
            }
            None => {
                let setting = ActiveModel {
                    key: Set(key.to_owned()),
                    value: Set(value.to_owned()),
                    updated_at: Set(now),
                };
                setting.insert(db).await
            }
        }
    }

    /// Whether the maintenance switch is on. A missing key reads as off.
    pub async fn maintenance_mode(db: &DbConn) -> Result<bool, DbErr> {
        Ok(Self::get(db, MAINTENANCE_MODE).await?.as_deref() == Some("true"))
    }

    pub async fn maintenance_message(db: &DbConn) -> Result<Option<String>, DbErr> {
        Self::get(db, MAINTENANCE_MESSAGE).await
    }

    pub async fn set_maintenance(
        db: &DbConn,
        enabled: bool,
        message: Option<&str>,
    ) -> Result<(), DbErr> {
        Self::set(db, MAINTENANCE_MODE, if enabled { "true" } else { "false" }).await?;
        if let Some(message) = message {
            Self::set(db, MAINTENANCE_MESSAGE, message).await?;
        }
        Ok(())
    }
}
