use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202506010001_create_users::Migration),
            Box::new(migrations::m202506010002_create_committee_members::Migration),
            Box::new(migrations::m202506010003_create_attendance_records::Migration),
            Box::new(migrations::m202506010004_create_teams::Migration),
            Box::new(migrations::m202506010005_create_participants::Migration),
            Box::new(migrations::m202506010006_create_site_settings::Migration),
        ]
    }
}
