//! Dry-run driver
//!
//! Plays the launcher screen against the configured package registry: every
//! launch request is answered by a simulated updater that fails the first
//! `dry_run.failed_updates` times and succeeds afterwards.

use mp_app::{SessionAction, SessionOutcome, UpdaterLaunchSession, UpdaterResult};
use mp_core::ProvisioningConfig;
use tracing::{info, info_span, Instrument};

use super::wiring::{wire_updater_session, UpdaterWiring};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DryRunOutcome {
    Updated,
    Cancelled,
    /// The updater was never started (delegation off, names missing, or not installed).
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DryRunReport {
    pub outcome: DryRunOutcome,
    pub launches: u32,
}

pub async fn run_dry_run(config: &ProvisioningConfig) -> anyhow::Result<DryRunReport> {
    let wiring = UpdaterWiring::from_config(config)?;
    run_with_wiring(config, &wiring).await
}

pub async fn run_with_wiring(
    config: &ProvisioningConfig,
    wiring: &UpdaterWiring,
) -> anyhow::Result<DryRunReport> {
    let Some(mut session) = wire_updater_session(config, wiring)? else {
        return Ok(DryRunReport {
            outcome: DryRunOutcome::Skipped,
            launches: 0,
        });
    };

    let span = info_span!("dry_run", session_id = %session.coordinator().session_id());
    drive_session(&mut session, config.dry_run.failed_updates)
        .instrument(span)
        .await
}

async fn drive_session(
    session: &mut UpdaterLaunchSession,
    failed_updates: u32,
) -> anyhow::Result<DryRunReport> {
    let mut failures_left = failed_updates;
    let mut launches = 0;
    session.start(false);

    loop {
        match session.next_action().await? {
            SessionAction::LaunchUpdater(target) => {
                launches += 1;
                info!(%target, launches, "Launching role holder updater");
                let result = if failures_left > 0 {
                    failures_left -= 1;
                    UpdaterResult::Failed
                } else {
                    UpdaterResult::Ok
                };
                session.on_updater_result(result);
            }
            SessionAction::Finish(outcome) => {
                session.stop();
                let outcome = match outcome {
                    SessionOutcome::Updated => DryRunOutcome::Updated,
                    SessionOutcome::Cancelled => DryRunOutcome::Cancelled,
                };
                return Ok(DryRunReport { outcome, launches });
            }
        }
    }
}
