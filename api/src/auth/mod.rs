pub mod extractors;
pub mod guards;
pub mod middleware;
pub mod session;

pub use session::{AuthUser, SessionUser};
