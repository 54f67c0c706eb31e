//! # mp-core
//!
//! Core domain models and business logic for ManagedProvisioning.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the retry decision machine that governs role holder updater launches, the
//! role holder predicate helpers, and the ports the outer layers implement.

pub mod config;
pub mod ids;
pub mod ports;
pub mod role_holder;

// Re-export commonly used types at the crate root
pub use config::ProvisioningConfig;
pub use ids::{LaunchSessionId, UserId};
pub use role_holder::{
    CoordinatorEvent, LaunchAttemptCounters, LaunchDecision, LaunchFailureReason,
    LaunchRetryMachine, LaunchTarget, RetryBudget, RoleHolderError,
};
