use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Numeric user handle a launch target is resolved against.
///
/// 解析启动目标时使用的用户句柄。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl UserId {
    /// The system user. The role holder updater always runs as this user.
    pub const SYSTEM: UserId = UserId(0);
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "u{}", self.0)
    }
}
