use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::thread_rng;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

use super::team;
use crate::error::DomainError;

/// An event participant. Registration always lands them in a team; the
/// team reference only goes away if an admin moves them or deletes the team.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "participants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,
    pub team_id: Option<i64>,

    pub registered_at: DateTime<Utc>,
    /// The user who worked the registration desk for this entry.
    pub registered_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id",
        on_delete = "Cascade"
    )]
    Team,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RegisteredBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    RegisteredBy,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RegisteredBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Registers a participant and assigns them a team.
    ///
    /// Picks uniformly at random among teams that still have room; when every
    /// team is full, a new "Team {n+1}" is created and used. Existing
    /// participants are never touched: automatic assignment only ever adds.
    /// Capacity is a soft cap, so two registrations racing for the last slot
    /// may both land in it; that overshoot is accepted rather than locked
    /// against.
    pub async fn register(
        db: &DbConn,
        name: &str,
        registered_by: Option<i64>,
    ) -> Result<(Model, team::Model), DomainError> {
        let teams = team::Model::find_all_with_counts(db).await?;

        let open: Vec<&team::Model> = teams
            .iter()
            .filter(|(_, count)| *count < team::MAX_MEMBERS_PER_TEAM)
            .map(|(t, _)| t)
            .collect();

        let chosen = match open.choose(&mut thread_rng()) {
            Some(t) => (**t).clone(),
            None => team::Model::create(db, &format!("Team {}", teams.len() + 1)).await?,
        };

        let participant = Self::insert_into_team(db, name, Some(chosen.id), registered_by).await?;
        Ok((participant, chosen))
    }

    /// Plain insert used by registration (after team selection), the seeder,
    /// and tests that need a participant in a specific team.
    pub async fn insert_into_team(
        db: &DbConn,
        name: &str,
        team_id: Option<i64>,
        registered_by: Option<i64>,
    ) -> Result<Model, DbErr> {
        let participant = ActiveModel {
            name: Set(name.to_owned()),
            team_id: Set(team_id),
            registered_at: Set(Utc::now()),
            registered_by: Set(registered_by),
            ..Default::default()
        };

        participant.insert(db).await
    }

    /// Manual reassignment by an admin. Unconditional: the target team may
    /// already be at capacity, the soft cap does not apply here.
    pub async fn move_to_team(
        db: &DbConn,
        participant_id: i64,
        team_id: i64,
    ) -> Result<Model, DomainError> {
        let participant = Entity::find_by_id(participant_id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound("Participant"))?;

        team::Model::find_by_id(db, team_id)
            .await?
            .ok_or(DomainError::NotFound("Team"))?;

        let mut am: ActiveModel = participant.into();
        am.team_id = Set(Some(team_id));
        Ok(am.update(db).await?)
    }

    pub async fn delete(db: &DbConn, participant_id: i64) -> Result<(), DomainError> {
        let res = Entity::delete_by_id(participant_id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(DomainError::NotFound("Participant"));
        }
        Ok(())
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Id).all(db).await
    }

    pub async fn find_by_team(db: &DbConn, team_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TeamId.eq(team_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn count_for_team(db: &DbConn, team_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::TeamId.eq(team_id))
            .count(db)
            .await
    }
}
