pub mod m202506010001_create_users;
pub mod m202506010002_create_committee_members;
pub mod m202506010003_create_attendance_records;
pub mod m202506010004_create_teams;
pub mod m202506010005_create_participants;
pub mod m202506010006_create_site_settings;
