/// Role holder helper errors.
///
/// 角色持有者辅助错误类型。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleHolderError {
    #[error("role holder package name is empty")]
    EmptyPackageName,
    #[error("role holder updater package name is null or empty")]
    MissingUpdaterPackage,
    #[error("provisioning action {0:?} cannot be delegated to the role holder")]
    UnsupportedProvisioningAction(String),
}
