use chrono::NaiveDate;
use db::models::attendance_record::{AttendanceStatus, DailyStats, Model as Record};
use db::models::committee_member::Model as Member;
use db::models::user::Department;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::routes::attendance::common::RosterEntry;

/// The printed report grid fits six members per page; pagination defaults to
/// that size.
pub const REPORT_PAGE_SIZE: u64 = 6;

/// Status filter over the roster join. Unlike the stored status it has a
/// third value for members with no record at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatusFilter {
    Attend,
    Absent,
    Unmarked,
}

impl ReportStatusFilter {
    pub fn matches(self, record: Option<&Record>) -> bool {
        match self {
            ReportStatusFilter::Attend => {
                matches!(record, Some(r) if r.status == AttendanceStatus::Attend)
            }
            ReportStatusFilter::Absent => {
                matches!(record, Some(r) if r.status == AttendanceStatus::Absent)
            }
            ReportStatusFilter::Unmarked => record.is_none(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReportQuery {
    pub date: Option<NaiveDate>,
    pub department: Option<Department>,
    pub status: Option<ReportStatusFilter>,
    pub query: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
}

impl ReportQuery {
    pub fn date_or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| chrono::Utc::now().date_naive())
    }

    /// True when the roster-join row survives every active filter.
    pub fn matches(&self, member: &Member, record: Option<&Record>) -> bool {
        if let Some(department) = self.department {
            if member.department != department {
                return false;
            }
        }
        if let Some(status) = self.status {
            if !status.matches(record) {
                return false;
            }
        }
        if let Some(q) = &self.query {
            let q = q.to_lowercase();
            let department = member.department.to_string();
            if !member.name.to_lowercase().contains(&q) && !department.contains(&q) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Serialize)]
pub struct AttendanceReportResponse {
    pub date: NaiveDate,
    pub rows: Vec<RosterEntry>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    /// Stats for the whole date, not just the filtered rows.
    pub stats: DailyStats,
}
