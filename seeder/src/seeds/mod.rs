pub mod attendance;
pub mod committee_member;
pub mod participant;
pub mod team;
pub mod user;
