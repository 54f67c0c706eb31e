use anyhow::Context;
use managed_provisioning::bootstrap::{self, DryRunOutcome};
use mp_core::ProvisioningConfig;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    bootstrap::tracing::init_tracing_subscriber().context("Failed to initialize tracing")?;

    let config = match bootstrap::resolve_config_path(std::env::args()) {
        Some(path) => bootstrap::load_config(path)?,
        None => {
            info!("No config file given, using built-in defaults");
            ProvisioningConfig::default()
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to build tokio runtime")?;

    let report = runtime.block_on(bootstrap::run_dry_run(&config))?;
    match report.outcome {
        DryRunOutcome::Updated => info!(launches = report.launches, "Role holder updated"),
        DryRunOutcome::Cancelled => {
            error!(launches = report.launches, "Role holder update abandoned, falling back")
        }
        DryRunOutcome::Skipped => info!("Role holder updater not started"),
    }
    Ok(())
}
