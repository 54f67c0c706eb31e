//! ManagedProvisioning Application Orchestration Layer
//!
//! This crate contains the use cases that drive the role holder updater
//! launch: the retry coordinator, its event hub and the launch session.

pub mod usecases;

pub use usecases::role_holder_launch::{
    CoordinatorError, EventSubscription, ResolvingLaunchabilityChecker,
    RoleHolderLaunchCoordinator, SessionAction, SessionError, SessionOutcome, UpdaterLaunchSession,
    UpdaterResult, UpdaterTargetFactory,
};
