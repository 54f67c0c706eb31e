//! Default collaborators for the launch coordinator.

use std::sync::Arc;

use mp_core::{
    ports::{LaunchTargetFactoryPort, LaunchabilityCheckerPort, TargetResolverPort},
    role_holder::RoleHolderUpdaterHelper,
    LaunchTarget, RoleHolderError, UserId,
};

/// A target is launchable when some installed component resolves it for the
/// system user.
pub struct ResolvingLaunchabilityChecker {
    resolver: Arc<dyn TargetResolverPort>,
}

impl ResolvingLaunchabilityChecker {
    pub fn new(resolver: Arc<dyn TargetResolverPort>) -> Self {
        Self { resolver }
    }
}

impl LaunchabilityCheckerPort for ResolvingLaunchabilityChecker {
    fn can_launch(&self, target: &LaunchTarget) -> bool {
        self.resolver.can_resolve(target, UserId::SYSTEM)
    }
}

/// Produces the updater target. Construction fails when the updater package
/// is not configured.
pub struct UpdaterTargetFactory {
    target: LaunchTarget,
}

impl UpdaterTargetFactory {
    pub fn new(helper: &RoleHolderUpdaterHelper) -> Result<Self, RoleHolderError> {
        Ok(Self {
            target: helper.create_updater_target()?,
        })
    }
}

impl LaunchTargetFactoryPort for UpdaterTargetFactory {
    fn create_target(&self) -> LaunchTarget {
        self.target.clone()
    }
}
