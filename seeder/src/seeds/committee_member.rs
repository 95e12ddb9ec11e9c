use crate::seed::Seeder;
use db::models::committee_member::Model;
use db::models::user::Department;
use fake::{Fake, faker::name::en::Name};
use sea_orm::DatabaseConnection;

pub struct CommitteeMemberSeeder;

#[async_trait::async_trait]
impl Seeder for CommitteeMemberSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let departments = [
            Department::Planning,
            Department::Protocol,
            Department::Registration,
            Department::Publicity,
            Department::GeneralAffairs,
        ];

        // A dozen roster entries spread across departments, so every
        // department shows up in reports.
        for i in 0..12 {
            let name: String = Name().fake();
            let department = departments[i % departments.len()];
            Model::create(db, &name, department)
                .await
                .expect("failed to seed committee member");
        }
    }
}
