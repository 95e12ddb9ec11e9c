use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::participant;
use crate::error::DomainError;

/// Capacity used by automatic assignment. Manual moves may exceed it.
pub const MAX_MEMBERS_PER_TEAM: u64 = 5;

/// How many teams the seeder creates up front ("Team 1" .. "Team 8").
pub const DEFAULT_TEAM_COUNT: usize = 8;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::participant::Entity")]
    Participant,
}

impl Related<super::participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(db: &DbConn, name: &str) -> Result<Model, DbErr> {
        let now = Utc::now();
        let team = ActiveModel {
            name: Set(name.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        team.insert(db).await
    }

    /// Creates the standard "Team 1" .. "Team 8" set for a fresh database.
    pub async fn create_defaults(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        let mut teams = Vec::with_capacity(DEFAULT_TEAM_COUNT);
        for n in 1..=DEFAULT_TEAM_COUNT {
            teams.push(Self::create(db, &format!("Team {n}")).await?);
        }
        Ok(teams)
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Id).all(db).await
    }

    /// All teams paired with their current participant count.
    pub async fn find_all_with_counts(db: &DbConn) -> Result<Vec<(Model, u64)>, DbErr> {
        let teams = Self::find_all(db).await?;
        let mut out = Vec::with_capacity(teams.len());
        for team in teams {
            let count = participant::Model::count_for_team(db, team.id).await?;
            out.push((team, count));
        }
        Ok(out)
    }

    /// Removes every participant in the team and then the team itself, in one
    /// transaction. Returns how many participants went with it.
    pub async fn delete_with_participants(db: &DbConn, team_id: i64) -> Result<u64, DomainError> {
        let txn = db.begin().await.map_err(DomainError::StorageUnavailable)?;

        let team = Entity::find_by_id(team_id)
            .one(&txn)
            .await
            .map_err(DomainError::StorageUnavailable)?
            .ok_or(DomainError::NotFound("Team"))?;

        let removed = participant::Entity::delete_many()
            .filter(participant::Column::TeamId.eq(team.id))
            .exec(&txn)
            .await
            .map_err(DomainError::StorageUnavailable)?
            .rows_affected;

        Entity::delete_by_id(team.id)
            .exec(&txn)
            .await
            .map_err(DomainError::StorageUnavailable)?;

        txn.commit().await.map_err(DomainError::StorageUnavailable)?;
        Ok(removed)
    }
}
