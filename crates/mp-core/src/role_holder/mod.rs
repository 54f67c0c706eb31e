//! Role holder domain module.
//!
//! This module defines the updater launch retry machine, the events it
//! produces, and the helpers deciding whether delegation to the role holder
//! is possible.

pub mod actions;
mod error;
mod event;
mod helper;
mod launch_target;
pub mod retry_machine;
mod updater_helper;

pub use error::RoleHolderError;
pub use event::{CoordinatorEvent, LaunchFailureReason};
pub use helper::{RoleHolderHelper, RoleHolderHelperDeps};
pub use launch_target::LaunchTarget;
pub use retry_machine::{LaunchAttemptCounters, LaunchDecision, LaunchRetryMachine, RetryBudget};
pub use updater_helper::RoleHolderUpdaterHelper;
