use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::info;

use super::{actions, LaunchTarget, RoleHolderError};
use crate::ids::UserId;
use crate::ports::{PackageInstallCheckerPort, RoleHolderStubCheckerPort, TargetResolverPort};

/// Collaborators the role holder helper consults.
pub struct RoleHolderHelperDeps {
    pub install_checker: Arc<dyn PackageInstallCheckerPort>,
    pub resolver: Arc<dyn TargetResolverPort>,
    pub stub_checker: Arc<dyn RoleHolderStubCheckerPort>,
}

/// Decides whether provisioning can be handed to the role holder and maps
/// provisioning targets onto the role holder's own actions.
pub struct RoleHolderHelper {
    package_name: String,
    delegation_enabled: bool,
    user: UserId,
    install_checker: Arc<dyn PackageInstallCheckerPort>,
    resolver: Arc<dyn TargetResolverPort>,
    stub_checker: Arc<dyn RoleHolderStubCheckerPort>,
}

impl RoleHolderHelper {
    pub fn new(
        package_name: impl Into<String>,
        delegation_enabled: bool,
        user: UserId,
        deps: RoleHolderHelperDeps,
    ) -> Result<Self, RoleHolderError> {
        let package_name = package_name.into();
        if package_name.is_empty() {
            return Err(RoleHolderError::EmptyPackageName);
        }
        let RoleHolderHelperDeps {
            install_checker,
            resolver,
            stub_checker,
        } = deps;
        Ok(Self {
            package_name,
            delegation_enabled,
            user,
            install_checker,
            resolver,
            stub_checker,
        })
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Returns whether provisioning started with `provisioning` can be
    /// delegated to the role holder right now.
    pub fn is_ready_for_provisioning(&self, provisioning: &LaunchTarget) -> bool {
        if !self.delegation_enabled {
            #[cfg(feature = "tracing")]
            info!("Not delegating to role holder, because delegation is turned off");
            return false;
        }
        if role_holder_action_for(provisioning.action()).is_none() {
            #[cfg(feature = "tracing")]
            info!(
                action = provisioning.action(),
                "Not delegating to role holder, because the provisioning action is not supported"
            );
            return false;
        }
        if !self.install_checker.is_package_installed(&self.package_name) {
            #[cfg(feature = "tracing")]
            info!(package = %self.package_name, "Role holder is not installed");
            return false;
        }
        if self.stub_checker.is_stub(&self.package_name) {
            #[cfg(feature = "tracing")]
            info!(package = %self.package_name, "Role holder is a stub");
            return false;
        }
        let resolves_all = actions::ROLE_HOLDER_REQUIRED_ACTIONS.iter().all(|action| {
            let target = LaunchTarget::new(*action).with_package(self.package_name.clone());
            self.resolver.can_resolve(&target, self.user)
        });
        if !resolves_all {
            #[cfg(feature = "tracing")]
            info!(package = %self.package_name, "Role holder does not handle all required actions");
        }
        resolves_all
    }

    pub fn create_provisioning_target(
        &self,
        provisioning: &LaunchTarget,
    ) -> Result<LaunchTarget, RoleHolderError> {
        let action = role_holder_action_for(provisioning.action()).ok_or_else(|| {
            RoleHolderError::UnsupportedProvisioningAction(provisioning.action().to_string())
        })?;
        Ok(LaunchTarget::new(action)
            .with_package(self.package_name.clone())
            .with_extras(provisioning.extras().clone()))
    }

    pub fn create_finalization_target(&self) -> LaunchTarget {
        LaunchTarget::new(actions::ROLE_HOLDER_PROVISION_FINALIZATION)
            .with_package(self.package_name.clone())
    }
}

fn role_holder_action_for(provisioning_action: &str) -> Option<&'static str> {
    match provisioning_action {
        actions::PROVISION_MANAGED_PROFILE => Some(actions::ROLE_HOLDER_PROVISION_MANAGED_PROFILE),
        actions::PROVISION_MANAGED_DEVICE_FROM_TRUSTED_SOURCE => {
            Some(actions::ROLE_HOLDER_PROVISION_MANAGED_DEVICE_FROM_TRUSTED_SOURCE)
        }
        _ => None,
    }
}
