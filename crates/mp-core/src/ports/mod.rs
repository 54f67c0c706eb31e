//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the retry logic to remain independent of the
//! platform that actually resolves and starts packages.
//!
//! All ports here are synchronous: the coordinator makes its decision on a
//! single sequencing context and never blocks on a collaborator.

mod launch;
mod package;
mod role_holder_provider;
mod scheduler;


pub use launch::{LaunchTargetFactoryPort, LaunchabilityCheckerPort};
pub use package::{PackageInstallCheckerPort, RoleHolderStubCheckerPort, TargetResolverPort};
pub use role_holder_provider::RoleHolderProviderPort;
pub use scheduler::{ScheduledTask, SchedulerPort};
