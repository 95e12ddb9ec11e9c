pub mod user;
pub mod committee_member;
pub mod attendance_record;
pub mod team;
pub mod participant;
pub mod site_setting;

pub use user::Entity as User;
pub use committee_member::Entity as CommitteeMember;
pub use attendance_record::Entity as AttendanceRecord;
pub use team::Entity as Team;
pub use participant::Entity as Participant;
pub use site_setting::Entity as SiteSetting;
