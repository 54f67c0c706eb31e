use serde::{Deserialize, Serialize};

use super::LaunchTarget;

/// Why the coordinator gave up on launching the updater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaunchFailureReason {
    /// The updater stayed unlaunchable through every scheduled retry.
    ExceededLaunchRetries,
    /// The updater launched every time but the update never succeeded.
    ExceededUpdateRetries,
}

impl std::fmt::Display for LaunchFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExceededLaunchRetries => f.write_str("exceeded maximum number of updater launch retries"),
            Self::ExceededUpdateRetries => f.write_str("exceeded maximum number of update retries"),
        }
    }
}

/// Events emitted by the role holder launch coordinator.
///
/// 协调器对外发出的唯一可观察输出。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinatorEvent {
    /// The caller should launch the updater with this target.
    LaunchRequested { target: LaunchTarget },
    /// Retry budget exhausted; terminal for this session.
    Failed { reason: LaunchFailureReason },
}
