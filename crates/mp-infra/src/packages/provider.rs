use mp_core::config::RoleHolderConfig;
use mp_core::ports::RoleHolderProviderPort;

/// Role holder names taken from configuration. Empty names count as absent.
pub struct ConfiguredRoleHolderProvider {
    role_holder: Option<String>,
    updater: Option<String>,
}

impl ConfiguredRoleHolderProvider {
    pub fn new(config: &RoleHolderConfig) -> Self {
        Self {
            role_holder: config.package_name.clone().filter(|name| !name.is_empty()),
            updater: config
                .updater_package_name
                .clone()
                .filter(|name| !name.is_empty()),
        }
    }
}

impl RoleHolderProviderPort for ConfiguredRoleHolderProvider {
    fn role_holder_package(&self) -> Option<String> {
        self.role_holder.clone()
    }

    fn role_holder_updater_package(&self) -> Option<String> {
        self.updater.clone()
    }
}
