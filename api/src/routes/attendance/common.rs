use chrono::NaiveDate;
use db::models::attendance_record::{AttendanceStatus, Model as Record};
use db::models::committee_member::Model as Member;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct MarkAttendanceRequest {
    pub committee_member_id: i64,

    /// The ledger date being marked, `YYYY-MM-DD`.
    pub date: NaiveDate,

    pub status: AttendanceStatus,

    /// Inline check-in photo as base64, with or without a
    /// `data:image/...;base64,` prefix. Stored to disk; only its URL is
    /// persisted on the record.
    pub photo_data: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: Option<f64>,

    pub accuracy: Option<f64>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

impl DateQuery {
    /// A missing `date` parameter means today (UTC).
    pub fn date_or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

/// One roster-join row: a committee member and their record for the date, if
/// any. `record: null` is the implicit "absent, no detail" state.
#[derive(Debug, Serialize)]
pub struct RosterEntry {
    pub member: Member,
    pub record: Option<Record>,
}

#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub date: NaiveDate,
    pub entries: Vec<RosterEntry>,
}

/// Renders roster-join rows as CSV with columns
/// `member_id,name,department,date,status,check_in_time,address`.
///
/// Members without a record appear with status `unmarked` and empty detail
/// columns, keeping explicit and implicit absence distinguishable in the
/// export.
pub fn roster_csv(date: NaiveDate, rows: &[(Member, Option<Record>)]) -> String {
    let mut csv = String::from("member_id,name,department,date,status,check_in_time,address\n");

    fn esc(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    for (member, record) in rows {
        let status = record
            .as_ref()
            .map(|r| r.status.to_string())
            .unwrap_or_else(|| "unmarked".to_string());
        let check_in = record
            .as_ref()
            .and_then(|r| r.check_in_time)
            .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
            .unwrap_or_default();
        let address = record
            .as_ref()
            .and_then(|r| r.address.clone())
            .unwrap_or_default();

        let row = format!(
            "{},{},{},{},{},{},{}\n",
            member.id,
            esc(&member.name),
            member.department,
            date.format("%Y-%m-%d"),
            status,
            esc(&check_in),
            esc(&address),
        );
        csv.push_str(&row);
    }

    csv
}
