use crate::seed::Seeder;
use db::models::user::{Department, Model, Role};
use fake::{Fake, faker::name::en::Name};
use sea_orm::DatabaseConnection;

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        // Fixed admin account
        Model::create(
            db,
            "admin",
            "Admin1234",
            "Site Admin",
            Department::Planning,
            Role::Admin,
        )
        .await
        .expect("failed to seed admin user");

        // Fixed registration desk account
        Model::create(
            db,
            "frontdesk",
            "Desk1234",
            "Registration Desk",
            Department::Registration,
            Role::RegistrationCoordinator,
        )
        .await
        .expect("failed to seed frontdesk user");

        // Random committee accounts
        let departments = [
            Department::Planning,
            Department::Protocol,
            Department::Registration,
            Department::Publicity,
            Department::GeneralAffairs,
        ];
        for _ in 0..6 {
            let username = format!("u{:06}", fastrand::u32(..1_000_000));
            let display_name: String = Name().fake();
            let department = departments[fastrand::usize(..departments.len())];
            let _ = Model::create(
                db,
                &username,
                "Password123",
                &display_name,
                department,
                Role::Committee,
            )
            .await;
        }
    }
}
