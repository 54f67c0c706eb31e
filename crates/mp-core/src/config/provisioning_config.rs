//! Provisioning configuration domain model
//!
//! 配置 DTO：只描述数据，不包含加载逻辑。

use serde::{Deserialize, Serialize};

use crate::role_holder::RetryBudget;

const DEFAULT_LAUNCH_RETRY_DELAY_MS: u64 = 60 * 1000;
const DEFAULT_LAUNCH_MAX_RETRIES: u32 = 3;
const DEFAULT_UPDATE_MAX_RETRIES: u32 = 3;

/// Application configuration
///
/// Every section is optional in the file; a missing section takes the
/// application's built-in values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    /// Role holder delegation settings
    pub role_holder: RoleHolderConfig,

    /// Retry budget for launching the role holder updater
    pub updater_launch: UpdaterLaunchConfig,

    /// Packages known to the in-memory package registry
    pub packages: Vec<PackageConfig>,

    /// Behaviour of the dry-run driver
    pub dry_run: DryRunConfig,
}

/// Role holder delegation configuration
///
/// 角色持有者委托配置。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleHolderConfig {
    /// Package name of the device management role holder
    pub package_name: Option<String>,

    /// Package name of the role holder updater
    pub updater_package_name: Option<String>,

    /// Whether provisioning may be deferred to the role holder at all
    pub defer_provisioning_to_role_holder: bool,
}

/// Role holder updater launch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterLaunchConfig {
    /// Delay before re-attempting an unlaunchable updater
    pub launch_retry_delay_ms: u64,

    /// Cap on reschedule attempts while the updater cannot be launched
    pub launch_max_retries: u32,

    /// Cap on updater launches whose update did not succeed
    pub update_max_retries: u32,
}

impl Default for UpdaterLaunchConfig {
    fn default() -> Self {
        Self {
            launch_retry_delay_ms: DEFAULT_LAUNCH_RETRY_DELAY_MS,
            launch_max_retries: DEFAULT_LAUNCH_MAX_RETRIES,
            update_max_retries: DEFAULT_UPDATE_MAX_RETRIES,
        }
    }
}

impl UpdaterLaunchConfig {
    pub fn retry_budget(&self) -> RetryBudget {
        RetryBudget::from_millis(
            self.launch_max_retries,
            self.update_max_retries,
            self.launch_retry_delay_ms,
        )
    }
}

/// An installed package as the package registry sees it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    pub name: String,

    /// Actions the package has a component for
    pub handled_actions: Vec<String>,

    /// A stub is installed but carries no real implementation
    pub stub: bool,
}

/// Dry-run driver configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DryRunConfig {
    /// Number of updater launches that report a failed update before one succeeds
    pub failed_updates: u32,
}
