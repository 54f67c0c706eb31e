//! Updater launch session.
//!
//! Drives one coordinator the way the launcher screen does: start on a fresh
//! session, relaunch when the updater reports anything but success, and
//! finish on success or terminal failure.

use mp_core::{CoordinatorEvent, LaunchTarget};
use tracing::{info, warn};

use super::coordinator::RoleHolderLaunchCoordinator;
use super::event_hub::EventSubscription;

/// Result reported by the updater after it was launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdaterResult {
    Ok,
    Canceled,
    Failed,
}

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The role holder was updated.
    Updated,
    /// Retries were exhausted; the caller should fall back.
    Cancelled,
}

/// What the caller must do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    LaunchUpdater(LaunchTarget),
    Finish(SessionOutcome),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session already finished with {0:?}")]
    Finished(SessionOutcome),
    #[error("coordinator event stream closed")]
    EventsClosed,
}

pub struct UpdaterLaunchSession {
    coordinator: RoleHolderLaunchCoordinator,
    events: EventSubscription,
    queued_finish: Option<SessionOutcome>,
    outcome: Option<SessionOutcome>,
}

impl UpdaterLaunchSession {
    pub fn new(coordinator: RoleHolderLaunchCoordinator) -> Self {
        let events = coordinator.observe_events();
        Self {
            coordinator,
            events,
            queued_finish: None,
            outcome: None,
        }
    }

    /// Kicks off the first attempt. A restored session does nothing: its
    /// coordinator already ran.
    pub fn start(&mut self, restored: bool) {
        if restored {
            return;
        }
        self.coordinator.try_launch();
    }

    /// Waits for the next action. Pending retries are awaited here, so this
    /// only returns once the coordinator emits or a result finished the
    /// session.
    pub async fn next_action(&mut self) -> Result<SessionAction, SessionError> {
        if let Some(outcome) = self.outcome {
            return Err(SessionError::Finished(outcome));
        }
        if let Some(outcome) = self.queued_finish.take() {
            return Ok(self.finish(outcome));
        }
        match self.events.recv().await {
            Some(CoordinatorEvent::LaunchRequested { target }) => {
                Ok(SessionAction::LaunchUpdater(target))
            }
            Some(CoordinatorEvent::Failed { reason }) => {
                warn!(%reason, "Giving up on role holder updater");
                Ok(self.finish(SessionOutcome::Cancelled))
            }
            None => Err(SessionError::EventsClosed),
        }
    }

    pub fn on_updater_result(&mut self, result: UpdaterResult) {
        if self.outcome.is_some() || self.queued_finish.is_some() {
            warn!(?result, "Ignoring updater result for a finished session");
            return;
        }
        info!(?result, "Device management role holder updater result");
        match result {
            UpdaterResult::Ok => self.queued_finish = Some(SessionOutcome::Updated),
            UpdaterResult::Canceled | UpdaterResult::Failed => self.coordinator.try_launch(),
        }
    }

    /// Tears the session down; pending retries are cancelled.
    pub fn stop(&self) {
        self.coordinator.stop_retries();
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn coordinator(&self) -> &RoleHolderLaunchCoordinator {
        &self.coordinator
    }

    fn finish(&mut self, outcome: SessionOutcome) -> SessionAction {
        self.coordinator.stop_retries();
        self.outcome = Some(outcome);
        SessionAction::Finish(outcome)
    }
}
