use crate::seed::Seeder;
use db::models::participant::Model;
use db::models::user;
use fake::{Fake, faker::name::en::Name};
use sea_orm::DatabaseConnection;

pub struct ParticipantSeeder;

#[async_trait::async_trait]
impl Seeder for ParticipantSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let registered_by = user::Model::find_by_username(db, "frontdesk")
            .await
            .ok()
            .flatten()
            .map(|u| u.id);

        // Register through the allocator so the seeded rosters look like real
        // registration-day output (random spread, capped teams).
        for _ in 0..25 {
            let name: String = Name().fake();
            Model::register(db, &name, registered_by)
                .await
                .expect("failed to seed participant");
        }
    }
}
