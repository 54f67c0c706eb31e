use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use mp_core::ports::{ScheduledTask, SchedulerPort};
use tokio::runtime::{Handle, TryCurrentError};
use tokio::time::sleep;
use tracing::debug;

/// Scheduler backed by tokio timers.
///
/// Every `post_delayed` spawns its own sleeping task on the captured runtime.
/// `cancel_all` aborts them and bumps a generation counter, so a timer that
/// already woke up but has not run its callback yet also stays silent.
/// Run it on a current-thread runtime (or a `LocalSet`) to keep one
/// sequencing context for the coordinator.
pub struct TokioScheduler {
    handle: Handle,
    state: Arc<Mutex<SchedulerState>>,
}

#[derive(Default)]
struct SchedulerState {
    generation: u64,
    next_id: u64,
    pending: HashMap<u64, tokio::task::AbortHandle>,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            state: Arc::new(Mutex::new(SchedulerState::default())),
        }
    }

    /// Captures the runtime this is called from.
    pub fn current() -> Result<Self, TryCurrentError> {
        Ok(Self::new(Handle::try_current()?))
    }

    pub fn pending(&self) -> usize {
        lock(&self.state).pending.len()
    }
}

impl SchedulerPort for TokioScheduler {
    fn post_delayed(&self, delay: Duration, task: ScheduledTask) {
        let state = Arc::clone(&self.state);
        let mut guard = lock(&self.state);
        let id = guard.next_id;
        guard.next_id += 1;
        let generation = guard.generation;

        let handle = self.handle.spawn(async move {
            sleep(delay).await;
            {
                let mut guard = lock(&state);
                if guard.generation != generation {
                    return;
                }
                guard.pending.remove(&id);
            }
            task();
        });

        guard.pending.insert(id, handle.abort_handle());
        debug!(task_id = id, ?delay, "retry scheduled");
    }

    fn cancel_all(&self) {
        let mut guard = lock(&self.state);
        guard.generation += 1;
        let cancelled = guard.pending.len();
        for (_, handle) in guard.pending.drain() {
            handle.abort();
        }
        if cancelled > 0 {
            debug!(cancelled, "scheduled retries cancelled");
        }
    }
}

fn lock(state: &Mutex<SchedulerState>) -> MutexGuard<'_, SchedulerState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DELAY: Duration = Duration::from_millis(100);

    fn counting_task(counter: &Arc<AtomicUsize>) -> ScheduledTask {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn post_delayed_runs_after_delay() {
        let scheduler = TokioScheduler::current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        scheduler.post_delayed(DELAY, counting_task(&fired));
        assert_eq!(scheduler.pending(), 1);

        sleep(DELAY - Duration::from_millis(1)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_drops_pending_tasks() {
        let scheduler = TokioScheduler::current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        scheduler.post_delayed(DELAY, counting_task(&fired));
        scheduler.post_delayed(DELAY * 2, counting_task(&fired));
        scheduler.cancel_all();
        sleep(DELAY * 5).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_is_idempotent() {
        let scheduler = TokioScheduler::current().unwrap();
        scheduler.cancel_all();
        scheduler.cancel_all();
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn post_delayed_does_not_replace_pending_task() {
        let scheduler = TokioScheduler::current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        scheduler.post_delayed(DELAY, counting_task(&fired));
        scheduler.post_delayed(DELAY, counting_task(&fired));
        assert_eq!(scheduler.pending(), 2);
        sleep(DELAY + Duration::from_millis(1)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn tasks_posted_after_cancel_still_run() {
        let scheduler = TokioScheduler::current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        scheduler.post_delayed(DELAY, counting_task(&fired));
        scheduler.cancel_all();
        scheduler.post_delayed(DELAY, counting_task(&fired));
        sleep(DELAY + Duration::from_millis(1)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn schedulers_on_one_runtime_cancel_independently() {
        let first = TokioScheduler::current().unwrap();
        let second = TokioScheduler::current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        first.post_delayed(DELAY, counting_task(&fired));
        second.post_delayed(DELAY, counting_task(&fired));
        first.cancel_all();
        sleep(DELAY + Duration::from_millis(1)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(second.pending(), 0);
    }

    #[test]
    fn current_outside_runtime_fails() {
        assert!(TokioScheduler::current().is_err());
    }
}
