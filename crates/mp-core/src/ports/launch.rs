use crate::role_holder::LaunchTarget;

/// Answers whether a launch target can currently be started.
pub trait LaunchabilityCheckerPort: Send + Sync {
    fn can_launch(&self, target: &LaunchTarget) -> bool;
}

/// Builds the target used to launch the external helper.
///
/// Implementations validate their inputs at construction so this call
/// cannot fail.
pub trait LaunchTargetFactoryPort: Send + Sync {
    fn create_target(&self) -> LaunchTarget;
}
