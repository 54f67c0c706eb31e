use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Launch session identifier.
///
/// One id per coordinator lifetime; it only labels tracing spans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaunchSessionId(String);

impl LaunchSessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LaunchSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for LaunchSessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LaunchSessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LaunchSessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
