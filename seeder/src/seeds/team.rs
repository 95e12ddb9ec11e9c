use crate::seed::Seeder;
use db::models::team::Model;
use sea_orm::DatabaseConnection;

pub struct TeamSeeder;

#[async_trait::async_trait]
impl Seeder for TeamSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        Model::create_defaults(db)
            .await
            .expect("failed to seed default teams");
    }
}
