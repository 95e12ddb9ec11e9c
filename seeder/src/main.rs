use crate::seed::Seeder;
use crate::seed::run_seeder;
use crate::seeds::{
    attendance::AttendanceSeeder, committee_member::CommitteeMemberSeeder,
    participant::ParticipantSeeder, team::TeamSeeder, user::UserSeeder,
};
use migration::{Migrator, MigratorTrait};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let db = db::connect().await;

    // Start from a clean schema every run.
    Migrator::fresh(&db).await.expect("Failed to reset schema");

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(CommitteeMemberSeeder), "CommitteeMember"),
        (Box::new(TeamSeeder), "Team"),
        (Box::new(ParticipantSeeder), "Participant"),
        (Box::new(AttendanceSeeder), "Attendance"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
