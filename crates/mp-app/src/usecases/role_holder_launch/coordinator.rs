//! Role holder launch coordinator.
//!
//! This module couples the pure retry machine with its side effects:
//! emitting events and scheduling deferred retries.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use mp_core::{
    ports::{LaunchTargetFactoryPort, LaunchabilityCheckerPort, SchedulerPort},
    CoordinatorEvent, LaunchAttemptCounters, LaunchDecision, LaunchRetryMachine, LaunchSessionId,
    RetryBudget,
};
use tracing::{debug, error, info_span, warn};

use super::event_hub::{CoordinatorEventHub, EventSubscription};

/// Errors produced while assembling the coordinator.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("missing required collaborator: {0}")]
    MissingCollaborator(&'static str),
}

/// Bounded-retry scheduler for launching the role holder updater.
///
/// Each [`try_launch`](Self::try_launch) either requests a launch, schedules
/// a retry, or reports that a retry budget is exhausted. Dropping the
/// coordinator turns any pending retry into a no-op.
pub struct RoleHolderLaunchCoordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    session_id: LaunchSessionId,
    budget: RetryBudget,
    counters: Mutex<LaunchAttemptCounters>,
    checker: Arc<dyn LaunchabilityCheckerPort>,
    target_factory: Arc<dyn LaunchTargetFactoryPort>,
    scheduler: Arc<dyn SchedulerPort>,
    events: CoordinatorEventHub,
}

impl RoleHolderLaunchCoordinator {
    pub fn builder() -> RoleHolderLaunchCoordinatorBuilder {
        RoleHolderLaunchCoordinatorBuilder::default()
    }

    pub fn session_id(&self) -> &LaunchSessionId {
        &self.inner.session_id
    }

    /// Runs one decision cycle.
    pub fn try_launch(&self) {
        CoordinatorInner::try_launch(&self.inner);
    }

    /// Cancels every pending retry. Safe to call at any time.
    pub fn stop_retries(&self) {
        debug!(session_id = %self.inner.session_id, "stopping launch retries");
        self.inner.scheduler.cancel_all();
    }

    pub fn observe_events(&self) -> EventSubscription {
        self.inner.events.subscribe()
    }

    pub fn counters(&self) -> LaunchAttemptCounters {
        *self.inner.lock_counters()
    }

    pub fn budget(&self) -> RetryBudget {
        self.inner.budget
    }
}

impl CoordinatorInner {
    fn try_launch(this: &Arc<Self>) {
        let _span = info_span!("role_holder_launch.try_launch", session_id = %this.session_id)
            .entered();

        let target = this.target_factory.create_target();
        let launchable = this.checker.can_launch(&target);

        // Decide under the lock, act after releasing it: a scheduler may run
        // the task inline and re-enter.
        let decision = {
            let mut counters = this.lock_counters();
            let (next, decision) = LaunchRetryMachine::decide(*counters, &this.budget, launchable);
            *counters = next;
            decision
        };

        match decision {
            LaunchDecision::Launch => {
                debug!(%target, "requesting role holder updater launch");
                this.events.emit(CoordinatorEvent::LaunchRequested { target });
            }
            LaunchDecision::Reschedule { delay } => {
                warn!(%target, ?delay, "Cannot launch role holder updater, retry scheduled");
                let weak: Weak<Self> = Arc::downgrade(this);
                this.scheduler.post_delayed(
                    delay,
                    Box::new(move || {
                        if let Some(inner) = weak.upgrade() {
                            CoordinatorInner::try_launch(&inner);
                        }
                    }),
                );
            }
            LaunchDecision::Fail(reason) => {
                error!(%reason, "Role holder updater launch failed");
                this.events.emit(CoordinatorEvent::Failed { reason });
            }
        }
    }

    fn lock_counters(&self) -> MutexGuard<'_, LaunchAttemptCounters> {
        self.counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Builder for assembling the coordinator. Every collaborator is required.
#[derive(Default)]
pub struct RoleHolderLaunchCoordinatorBuilder {
    budget: Option<RetryBudget>,
    checker: Option<Arc<dyn LaunchabilityCheckerPort>>,
    target_factory: Option<Arc<dyn LaunchTargetFactoryPort>>,
    scheduler: Option<Arc<dyn SchedulerPort>>,
    session_id: Option<LaunchSessionId>,
}

impl RoleHolderLaunchCoordinatorBuilder {
    pub fn with_budget(mut self, budget: RetryBudget) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_checker(mut self, checker: Arc<dyn LaunchabilityCheckerPort>) -> Self {
        self.checker = Some(checker);
        self
    }

    pub fn with_target_factory(mut self, target_factory: Arc<dyn LaunchTargetFactoryPort>) -> Self {
        self.target_factory = Some(target_factory);
        self
    }

    pub fn with_scheduler(mut self, scheduler: Arc<dyn SchedulerPort>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn with_session_id(mut self, session_id: LaunchSessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn build(self) -> Result<RoleHolderLaunchCoordinator, CoordinatorError> {
        let inner = CoordinatorInner {
            session_id: self.session_id.unwrap_or_default(),
            budget: self
                .budget
                .ok_or(CoordinatorError::MissingCollaborator("retry budget"))?,
            counters: Mutex::new(LaunchAttemptCounters::default()),
            checker: self
                .checker
                .ok_or(CoordinatorError::MissingCollaborator("launchability checker"))?,
            target_factory: self
                .target_factory
                .ok_or(CoordinatorError::MissingCollaborator("launch target factory"))?,
            scheduler: self
                .scheduler
                .ok_or(CoordinatorError::MissingCollaborator("scheduler"))?,
            events: CoordinatorEventHub::new(),
        };
        Ok(RoleHolderLaunchCoordinator {
            inner: Arc::new(inner),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use mp_core::ports::ScheduledTask;
    use mp_core::role_holder::actions;
    use mp_core::{LaunchFailureReason, LaunchTarget};

    const UPDATER: &str = "com.test.updater";

    struct ToggleChecker(AtomicBool);

    impl ToggleChecker {
        fn new(launchable: bool) -> Arc<Self> {
            Arc::new(Self(AtomicBool::new(launchable)))
        }

        fn set(&self, launchable: bool) {
            self.0.store(launchable, Ordering::SeqCst);
        }
    }

    impl LaunchabilityCheckerPort for ToggleChecker {
        fn can_launch(&self, _target: &LaunchTarget) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    struct FixedFactory;

    impl LaunchTargetFactoryPort for FixedFactory {
        fn create_target(&self) -> LaunchTarget {
            updater_target()
        }
    }

    /// Queues tasks until the test fires them; no real time passes.
    #[derive(Default)]
    struct ManualScheduler {
        pending: Mutex<VecDeque<(Duration, ScheduledTask)>>,
    }

    impl ManualScheduler {
        fn pending(&self) -> usize {
            self.pending.lock().unwrap().len()
        }

        fn delays(&self) -> Vec<Duration> {
            self.pending.lock().unwrap().iter().map(|(d, _)| *d).collect()
        }

        /// Runs the tasks pending right now; tasks they post stay queued.
        fn fire_pending(&self) {
            let due: Vec<_> = self.pending.lock().unwrap().drain(..).collect();
            for (_, task) in due {
                task();
            }
        }
    }

    impl SchedulerPort for ManualScheduler {
        fn post_delayed(&self, delay: Duration, task: ScheduledTask) {
            self.pending.lock().unwrap().push_back((delay, task));
        }

        fn cancel_all(&self) {
            self.pending.lock().unwrap().clear();
        }
    }

    fn updater_target() -> LaunchTarget {
        LaunchTarget::new(actions::UPDATE_DEVICE_MANAGEMENT_ROLE_HOLDER).with_package(UPDATER)
    }

    fn launch_event() -> CoordinatorEvent {
        CoordinatorEvent::LaunchRequested {
            target: updater_target(),
        }
    }

    fn failed(reason: LaunchFailureReason) -> CoordinatorEvent {
        CoordinatorEvent::Failed { reason }
    }

    fn coordinator(
        launch_max: u32,
        update_max: u32,
        checker: Arc<ToggleChecker>,
        scheduler: Arc<ManualScheduler>,
    ) -> RoleHolderLaunchCoordinator {
        RoleHolderLaunchCoordinator::builder()
            .with_budget(RetryBudget::from_millis(launch_max, update_max, 100))
            .with_checker(checker)
            .with_target_factory(Arc::new(FixedFactory))
            .with_scheduler(scheduler)
            .build()
            .unwrap()
    }

    #[test]
    fn try_launch_launchable_requests_launch() {
        let scheduler = Arc::new(ManualScheduler::default());
        let coordinator = coordinator(1, 1, ToggleChecker::new(true), scheduler.clone());
        let mut events = coordinator.observe_events();

        coordinator.try_launch();

        assert_eq!(events.drain(), vec![launch_event()]);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(coordinator.counters().update_tries, 1);
    }

    #[test]
    fn try_launch_exceeds_update_retries_fails() {
        let scheduler = Arc::new(ManualScheduler::default());
        let coordinator = coordinator(1, 1, ToggleChecker::new(true), scheduler.clone());
        let mut events = coordinator.observe_events();

        coordinator.try_launch();
        coordinator.try_launch();

        assert_eq!(
            events.drain(),
            vec![
                launch_event(),
                failed(LaunchFailureReason::ExceededUpdateRetries)
            ]
        );
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn try_launch_always_launchable_emits_n_launches_then_one_failure() {
        let scheduler = Arc::new(ManualScheduler::default());
        let coordinator = coordinator(1, 3, ToggleChecker::new(true), scheduler);
        let mut events = coordinator.observe_events();

        for _ in 0..4 {
            coordinator.try_launch();
        }

        let mut expected = vec![launch_event(); 3];
        expected.push(failed(LaunchFailureReason::ExceededUpdateRetries));
        assert_eq!(events.drain(), expected);
    }

    #[test]
    fn try_launch_unlaunchable_reschedules_without_event() {
        let scheduler = Arc::new(ManualScheduler::default());
        let coordinator = coordinator(2, 1, ToggleChecker::new(false), scheduler.clone());
        let mut events = coordinator.observe_events();

        coordinator.try_launch();

        assert!(events.drain().is_empty());
        assert_eq!(scheduler.delays(), vec![Duration::from_millis(100)]);
        assert_eq!(coordinator.counters().launch_tries, 1);
    }

    #[test]
    fn try_launch_never_launchable_reschedules_n_times_then_fails() {
        let scheduler = Arc::new(ManualScheduler::default());
        let coordinator = coordinator(3, 1, ToggleChecker::new(false), scheduler.clone());
        let mut events = coordinator.observe_events();

        coordinator.try_launch();
        let mut reschedules = 0;
        while scheduler.pending() > 0 {
            reschedules += 1;
            scheduler.fire_pending();
        }

        assert_eq!(reschedules, 3);
        assert_eq!(
            events.drain(),
            vec![failed(LaunchFailureReason::ExceededLaunchRetries)]
        );
        assert_eq!(coordinator.counters().launch_tries, 3);
    }

    #[test]
    fn try_launch_becomes_launchable_before_retry_fires() {
        let checker = ToggleChecker::new(false);
        let scheduler = Arc::new(ManualScheduler::default());
        let coordinator = coordinator(2, 1, checker.clone(), scheduler.clone());
        let mut events = coordinator.observe_events();

        coordinator.try_launch();
        checker.set(true);
        scheduler.fire_pending();

        assert_eq!(events.drain(), vec![launch_event()]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn stop_retries_cancels_pending_retry() {
        let scheduler = Arc::new(ManualScheduler::default());
        let coordinator = coordinator(1, 1, ToggleChecker::new(false), scheduler.clone());
        let mut events = coordinator.observe_events();

        coordinator.try_launch();
        coordinator.stop_retries();
        scheduler.fire_pending();

        assert!(events.drain().is_empty());
    }

    #[test]
    fn stop_retries_is_idempotent_and_harmless_after_failure() {
        let scheduler = Arc::new(ManualScheduler::default());
        let coordinator = coordinator(0, 0, ToggleChecker::new(true), scheduler);
        let mut events = coordinator.observe_events();

        coordinator.stop_retries();
        coordinator.try_launch();
        coordinator.stop_retries();
        coordinator.stop_retries();

        assert_eq!(
            events.drain(),
            vec![failed(LaunchFailureReason::ExceededUpdateRetries)]
        );
    }

    #[test]
    fn try_launch_while_retry_pending_keeps_both_retries() {
        let checker = ToggleChecker::new(false);
        let scheduler = Arc::new(ManualScheduler::default());
        let coordinator = coordinator(2, 2, checker.clone(), scheduler.clone());
        let mut events = coordinator.observe_events();

        coordinator.try_launch();
        coordinator.try_launch();

        // No deduplication: the second call neither cancels nor replaces the first.
        assert_eq!(scheduler.pending(), 2);
        assert_eq!(coordinator.counters().launch_tries, 2);

        checker.set(true);
        scheduler.fire_pending();

        assert_eq!(events.drain(), vec![launch_event(), launch_event()]);
    }

    #[test]
    fn pending_retry_after_drop_is_noop() {
        let scheduler = Arc::new(ManualScheduler::default());
        let coordinator = coordinator(1, 1, ToggleChecker::new(false), scheduler.clone());
        let mut events = coordinator.observe_events();

        coordinator.try_launch();
        drop(coordinator);
        scheduler.fire_pending();

        assert!(events.drain().is_empty());
    }

    #[test]
    fn inline_scheduler_does_not_deadlock() {
        struct InlineScheduler;

        impl SchedulerPort for InlineScheduler {
            fn post_delayed(&self, _delay: Duration, task: ScheduledTask) {
                task();
            }

            fn cancel_all(&self) {}
        }

        let coordinator = RoleHolderLaunchCoordinator::builder()
            .with_budget(RetryBudget::from_millis(2, 1, 100))
            .with_checker(ToggleChecker::new(false))
            .with_target_factory(Arc::new(FixedFactory))
            .with_scheduler(Arc::new(InlineScheduler))
            .build()
            .unwrap();
        let mut events = coordinator.observe_events();

        coordinator.try_launch();

        assert_eq!(
            events.drain(),
            vec![failed(LaunchFailureReason::ExceededLaunchRetries)]
        );
    }

    #[test]
    fn build_without_scheduler_fails() {
        let result = RoleHolderLaunchCoordinator::builder()
            .with_budget(RetryBudget::from_millis(1, 1, 100))
            .with_checker(ToggleChecker::new(true))
            .with_target_factory(Arc::new(FixedFactory))
            .build();

        assert!(matches!(
            result,
            Err(CoordinatorError::MissingCollaborator("scheduler"))
        ));
    }

    #[test]
    fn build_without_budget_fails() {
        let result = RoleHolderLaunchCoordinator::builder()
            .with_checker(ToggleChecker::new(true))
            .with_target_factory(Arc::new(FixedFactory))
            .with_scheduler(Arc::new(ManualScheduler::default()))
            .build();

        assert!(matches!(
            result,
            Err(CoordinatorError::MissingCollaborator("retry budget"))
        ));
    }
}
