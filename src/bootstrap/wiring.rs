//! Dependency wiring
//!
//! Assembles adapters from `mp-infra` into the `mp-app` use cases. This is the
//! only place that knows concrete adapter types.

use std::sync::Arc;

use anyhow::Context;
use mp_app::{
    ResolvingLaunchabilityChecker, RoleHolderLaunchCoordinator, UpdaterLaunchSession,
    UpdaterTargetFactory,
};
use mp_core::ports::RoleHolderProviderPort;
use mp_core::role_holder::RoleHolderUpdaterHelper;
use mp_core::ProvisioningConfig;
use mp_infra::{ConfiguredRoleHolderProvider, InMemoryPackageRegistry, TokioScheduler};
use tokio::runtime::Handle;
use tracing::info;

/// Adapters shared by the updater use cases.
///
/// Only the runtime handle is shared for timers; every session gets its own
/// scheduler so that stopping one session leaves the others' retries alone.
pub struct UpdaterWiring {
    pub registry: Arc<InMemoryPackageRegistry>,
    pub provider: Arc<dyn RoleHolderProviderPort>,
    pub runtime: Handle,
}

impl UpdaterWiring {
    /// Builds the default adapters. Must run inside a tokio runtime.
    pub fn from_config(config: &ProvisioningConfig) -> anyhow::Result<Self> {
        let runtime = Handle::try_current().context("Scheduler needs a running tokio runtime")?;
        Ok(Self {
            registry: Arc::new(InMemoryPackageRegistry::from_config(&config.packages)),
            provider: Arc::new(ConfiguredRoleHolderProvider::new(&config.role_holder)),
            runtime,
        })
    }
}

/// Builds the updater launch session, or `None` when the updater should not
/// be started on this device.
pub fn wire_updater_session(
    config: &ProvisioningConfig,
    wiring: &UpdaterWiring,
) -> anyhow::Result<Option<UpdaterLaunchSession>> {
    let helper = RoleHolderUpdaterHelper::new(
        wiring.provider.role_holder_updater_package(),
        wiring.provider.role_holder_package(),
        config.role_holder.defer_provisioning_to_role_holder,
        wiring.registry.clone(),
    );
    if !helper.should_start_updater() {
        return Ok(None);
    }

    let target_factory =
        UpdaterTargetFactory::new(&helper).context("Failed to build role holder updater target")?;
    let coordinator = RoleHolderLaunchCoordinator::builder()
        .with_budget(config.updater_launch.retry_budget())
        .with_checker(Arc::new(ResolvingLaunchabilityChecker::new(
            wiring.registry.clone(),
        )))
        .with_target_factory(Arc::new(target_factory))
        .with_scheduler(Arc::new(TokioScheduler::new(wiring.runtime.clone())))
        .build()?;

    info!(
        session_id = %coordinator.session_id(),
        budget = ?coordinator.budget(),
        "Role holder updater launch session wired"
    );
    Ok(Some(UpdaterLaunchSession::new(coordinator)))
}
