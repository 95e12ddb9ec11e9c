use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};

use super::committee_member;
use crate::error::{DomainError, is_unique_violation};

/// One attendance mark for one committee member on one date.
///
/// Rows are created lazily: a member with no row for a date is shown as
/// absent without anything being persisted. A unique index on
/// (committee_member_id, attendance_date) guarantees at most one row per
/// member per date; repeat marks update that row in place.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub committee_member_id: i64,
    pub attendance_date: NaiveDate,
    pub status: AttendanceStatus,

    /// URL of the stored check-in photo, if one was taken.
    pub photo_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    /// Human-readable place name resolved on the client; coordinates are the
    /// fallback when this is missing.
    pub address: Option<String>,

    /// Set when the status becomes `attend`, cleared on `absent`.
    pub check_in_time: Option<DateTime<Utc>>,
    /// The user who recorded the mark.
    pub marked_by: Option<i64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored attendance status. Backed by an `attendance_status` enum in the
/// database. "No row" is a third, implicit state that never hits storage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttendanceStatus {
    #[sea_orm(string_value = "attend")]
    Attend,

    #[sea_orm(string_value = "absent")]
    Absent,
}

/// Client-supplied GPS fix attached to a mark.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub address: Option<String>,
}

/// Aggregate figures for one date's ledger.
///
/// `absent` counts every member without an `attend` row for the date, so it
/// includes members that were never marked at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DailyStats {
    pub total: u64,
    pub attend: u64,
    pub absent: u64,
    pub rate: u32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::committee_member::Entity",
        from = "Column::CommitteeMemberId",
        to = "super::committee_member::Column::Id",
        on_delete = "Cascade"
    )]
    CommitteeMember,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MarkedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    MarkedBy,
}

impl Related<super::committee_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommitteeMember.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MarkedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Records (or re-records) attendance for a member on a date.
    ///
    /// The first mark for a (member, date) pair inserts a row; later marks
    /// update that row in place, replacing status, photo, location, and
    /// marker with the incoming values. Two marks racing past the existence
    /// check cannot create a duplicate: the loser's insert trips the unique
    /// index and is retried as an update of the winner's row.
    pub async fn mark(
        db: &DbConn,
        committee_member_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
        photo_url: Option<String>,
        location: Option<Location>,
        marked_by: Option<i64>,
    ) -> Result<Model, DomainError> {
        committee_member::Model::find_by_id(db, committee_member_id)
            .await?
            .ok_or(DomainError::NotFound("Committee member"))?;

        match Self::find_for_member_and_date(db, committee_member_id, date).await? {
            Some(existing) => {
                Self::apply_mark(db, existing, status, photo_url, location, marked_by).await
            }
            None => {
                let now = Utc::now();
                let check_in_time = match status {
                    AttendanceStatus::Attend => Some(now),
                    AttendanceStatus::Absent => None,
                };
                let record = ActiveModel {
                    committee_member_id: Set(committee_member_id),
                    attendance_date: Set(date),
                    status: Set(status),
                    photo_url: Set(photo_url.clone()),
                    latitude: Set(location.as_ref().map(|l| l.latitude)),
                    longitude: Set(location.as_ref().map(|l| l.longitude)),
                    accuracy: Set(location.as_ref().and_then(|l| l.accuracy)),
                    address: Set(location.as_ref().and_then(|l| l.address.clone())),
                    check_in_time: Set(check_in_time),
                    marked_by: Set(marked_by),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };

                match record.insert(db).await {
                    Ok(model) => Ok(model),
                    Err(e) if is_unique_violation(&e) => {
                        // A concurrent first mark won the insert; fold this
                        // one into its row.
                        let existing =
                            Self::find_for_member_and_date(db, committee_member_id, date)
                                .await?
                                .ok_or_else(|| {
                                    DomainError::ConstraintViolation(
                                        "Attendance record disappeared mid-update".into(),
                                    )
                                })?;
                        Self::apply_mark(db, existing, status, photo_url, location, marked_by)
                            .await
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    async fn apply_mark(
        db: &DbConn,
        existing: Model,
        status: AttendanceStatus,
        photo_url: Option<String>,
        location: Option<Location>,
        marked_by: Option<i64>,
    ) -> Result<Model, DomainError> {
        let now = Utc::now();
        let check_in_time = match status {
            AttendanceStatus::Attend => Some(now),
            AttendanceStatus::Absent => None,
        };

        let mut am: ActiveModel = existing.into();
        am.status = Set(status);
        am.photo_url = Set(photo_url);
        am.latitude = Set(location.as_ref().map(|l| l.latitude));
        am.longitude = Set(location.as_ref().map(|l| l.longitude));
        am.accuracy = Set(location.as_ref().and_then(|l| l.accuracy));
        am.address = Set(location.as_ref().and_then(|l| l.address.clone()));
        am.check_in_time = Set(check_in_time);
        am.marked_by = Set(marked_by);
        am.updated_at = Set(now);
        Ok(am.update(db).await?)
    }

    pub async fn find_for_member_and_date(
        db: &DbConn,
        committee_member_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::CommitteeMemberId.eq(committee_member_id))
            .filter(Column::AttendanceDate.eq(date))
            .one(db)
            .await
    }

    /// The read path for reports and the daily view: every committee member
    /// exactly once, paired with their record for the date when one exists.
    pub async fn for_date(
        db: &DbConn,
        date: NaiveDate,
    ) -> Result<Vec<(committee_member::Model, Option<Model>)>, DbErr> {
        let members = committee_member::Model::find_all(db).await?;
        let records = Entity::find()
            .filter(Column::AttendanceDate.eq(date))
            .all(db)
            .await?;

        let mut by_member: HashMap<i64, Model> = records
            .into_iter()
            .map(|r| (r.committee_member_id, r))
            .collect();

        Ok(members
            .into_iter()
            .map(|m| {
                let record = by_member.remove(&m.id);
                (m, record)
            })
            .collect())
    }

    pub async fn stats_for_date(db: &DbConn, date: NaiveDate) -> Result<DailyStats, DbErr> {
        let total = committee_member::Entity::find().count(db).await?;
        let attend = Entity::find()
            .filter(Column::AttendanceDate.eq(date))
            .filter(Column::Status.eq(AttendanceStatus::Attend))
            .count(db)
            .await?;

        let absent = total.saturating_sub(attend);
        let rate = if total == 0 {
            0
        } else {
            ((attend as f64 / total as f64) * 100.0).round() as u32
        };

        Ok(DailyStats {
            total,
            attend,
            absent,
            rate,
        })
    }
}
