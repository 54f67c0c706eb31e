//! Updater launch retry machine.
//!
//! Defines a pure transition function over the two attempt counters. The
//! coordinator in the application layer owns the counters and performs the
//! side effects each decision asks for.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::LaunchFailureReason;

/// Retry limits for one launch session.
///
/// 重试预算：在协调器生命周期内不可变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryBudget {
    /// Cap on reschedules while the target cannot be launched.
    pub launch_max_retries: u32,
    /// Cap on launches whose downstream update did not succeed.
    pub update_max_retries: u32,
    /// Delay before re-attempting an unlaunchable target.
    pub retry_delay: Duration,
}

impl RetryBudget {
    pub fn new(launch_max_retries: u32, update_max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            launch_max_retries,
            update_max_retries,
            retry_delay,
        }
    }

    pub fn from_millis(launch_max_retries: u32, update_max_retries: u32, retry_delay_ms: u64) -> Self {
        Self::new(
            launch_max_retries,
            update_max_retries,
            Duration::from_millis(retry_delay_ms),
        )
    }
}

/// Attempt counters, reset only by constructing a new value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchAttemptCounters {
    pub update_tries: u32,
    pub launch_tries: u32,
}

/// What one decision cycle asks the coordinator to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchDecision {
    /// Emit a launch request for the current target.
    Launch,
    /// Re-run the cycle after `delay`; no event this cycle.
    Reschedule { delay: Duration },
    /// Emit a terminal failure; nothing is scheduled.
    Fail(LaunchFailureReason),
}

/// Pure retry machine.
///
/// 纯状态机：不包含副作用。
pub struct LaunchRetryMachine;

impl LaunchRetryMachine {
    pub fn decide(
        counters: LaunchAttemptCounters,
        budget: &RetryBudget,
        launchable: bool,
    ) -> (LaunchAttemptCounters, LaunchDecision) {
        match launchable {
            true if counters.update_tries < budget.update_max_retries => (
                LaunchAttemptCounters {
                    update_tries: counters.update_tries + 1,
                    ..counters
                },
                LaunchDecision::Launch,
            ),
            true => (
                counters,
                LaunchDecision::Fail(LaunchFailureReason::ExceededUpdateRetries),
            ),
            false if counters.launch_tries < budget.launch_max_retries => (
                LaunchAttemptCounters {
                    launch_tries: counters.launch_tries + 1,
                    ..counters
                },
                LaunchDecision::Reschedule {
                    delay: budget.retry_delay,
                },
            ),
            false => (
                counters,
                LaunchDecision::Fail(LaunchFailureReason::ExceededLaunchRetries),
            ),
        }
    }
}
