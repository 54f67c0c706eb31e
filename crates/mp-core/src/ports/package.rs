use crate::ids::UserId;
use crate::role_holder::LaunchTarget;

pub trait PackageInstallCheckerPort: Send + Sync {
    fn is_package_installed(&self, package_name: &str) -> bool;
}

/// Platform resolution check: does some installed component handle `target`
/// for `user`.
pub trait TargetResolverPort: Send + Sync {
    fn can_resolve(&self, target: &LaunchTarget, user: UserId) -> bool;
}

pub trait RoleHolderStubCheckerPort: Send + Sync {
    fn is_stub(&self, package_name: &str) -> bool;
}
