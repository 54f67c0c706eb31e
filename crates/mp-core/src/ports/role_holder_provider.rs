/// Provides the package name currently holding the device management role.
pub trait RoleHolderProviderPort: Send + Sync {
    fn role_holder_package(&self) -> Option<String>;

    fn role_holder_updater_package(&self) -> Option<String>;
}
