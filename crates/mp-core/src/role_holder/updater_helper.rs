use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::info;

use super::{actions, LaunchTarget, RoleHolderError};
use crate::ports::PackageInstallCheckerPort;

/// Decides whether the role holder updater should run and builds its target.
pub struct RoleHolderUpdaterHelper {
    updater_package: Option<String>,
    role_holder_package: Option<String>,
    delegation_enabled: bool,
    install_checker: Arc<dyn PackageInstallCheckerPort>,
}

impl RoleHolderUpdaterHelper {
    pub fn new(
        updater_package: Option<String>,
        role_holder_package: Option<String>,
        delegation_enabled: bool,
        install_checker: Arc<dyn PackageInstallCheckerPort>,
    ) -> Self {
        Self {
            updater_package: non_empty(updater_package),
            role_holder_package: non_empty(role_holder_package),
            delegation_enabled,
            install_checker,
        }
    }

    pub fn should_start_updater(&self) -> bool {
        if !self.delegation_enabled {
            #[cfg(feature = "tracing")]
            info!("Not starting role holder updater, because delegation is turned off");
            return false;
        }
        if self.role_holder_package.is_none() {
            #[cfg(feature = "tracing")]
            info!("Not starting role holder updater, because the role holder package name is empty");
            return false;
        }
        let Some(updater_package) = self.updater_package.as_deref() else {
            #[cfg(feature = "tracing")]
            info!("Not starting role holder updater, because the updater package name is empty");
            return false;
        };
        self.install_checker.is_package_installed(updater_package)
    }

    pub fn create_updater_target(&self) -> Result<LaunchTarget, RoleHolderError> {
        let updater_package = self
            .updater_package
            .as_deref()
            .ok_or(RoleHolderError::MissingUpdaterPackage)?;
        Ok(LaunchTarget::new(actions::UPDATE_DEVICE_MANAGEMENT_ROLE_HOLDER)
            .with_package(updater_package))
    }
}

fn non_empty(name: Option<String>) -> Option<String> {
    name.filter(|name| !name.is_empty())
}
