//! ID type wrappers for type safety.

pub mod session_id;
pub mod user_id;

pub use session_id::LaunchSessionId;
pub use user_id::UserId;
