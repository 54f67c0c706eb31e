//! Role holder updater launch use cases.
//!
//! This module exposes the launch coordinator and the session that drives it.

mod collaborators;
pub mod coordinator;
mod event_hub;
pub mod session;

pub use collaborators::{ResolvingLaunchabilityChecker, UpdaterTargetFactory};
pub use coordinator::{
    CoordinatorError, RoleHolderLaunchCoordinator, RoleHolderLaunchCoordinatorBuilder,
};
pub use event_hub::{CoordinatorEventHub, EventSubscription};
pub use session::{SessionAction, SessionError, SessionOutcome, UpdaterLaunchSession, UpdaterResult};
