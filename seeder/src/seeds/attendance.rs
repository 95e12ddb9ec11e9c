use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::models::attendance_record::{AttendanceStatus, Location, Model};
use db::models::{committee_member, user};
use sea_orm::DatabaseConnection;

pub struct AttendanceSeeder;

const VENUES: [&str; 3] = ["Main Hall", "Registration Desk", "Auditorium Foyer"];

fn venue_location() -> Location {
    // Jittered fixes around one venue block.
    Location {
        latitude: -25.75 + (fastrand::f64() - 0.5) * 0.01,
        longitude: 28.23 + (fastrand::f64() - 0.5) * 0.01,
        accuracy: Some(5.0 + fastrand::f64() * 20.0),
        address: Some(VENUES[fastrand::usize(..VENUES.len())].to_string()),
    }
}

#[async_trait::async_trait]
impl Seeder for AttendanceSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let members = committee_member::Model::find_all(db)
            .await
            .expect("failed to load roster");
        let marked_by = user::Model::find_by_username(db, "admin")
            .await
            .ok()
            .flatten()
            .map(|u| u.id);

        let today = Utc::now().date_naive();
        let yesterday = today - Duration::days(1);

        // Yesterday: most attended, a few explicit absences, the rest left
        // unmarked so reports show all three states.
        for member in &members {
            let roll = fastrand::u8(..100);
            if roll < 70 {
                Model::mark(
                    db,
                    member.id,
                    yesterday,
                    AttendanceStatus::Attend,
                    None,
                    Some(venue_location()),
                    marked_by,
                )
                .await
                .expect("failed to seed attendance record");
            } else if roll < 85 {
                Model::mark(
                    db,
                    member.id,
                    yesterday,
                    AttendanceStatus::Absent,
                    None,
                    None,
                    marked_by,
                )
                .await
                .expect("failed to seed attendance record");
            }
        }

        // Today: a half-marked day in progress.
        for member in &members {
            if fastrand::bool() {
                Model::mark(
                    db,
                    member.id,
                    today,
                    AttendanceStatus::Attend,
                    None,
                    Some(venue_location()),
                    marked_by,
                )
                .await
                .expect("failed to seed attendance record");
            }
        }
    }
}
