use std::time::Duration;

/// A deferred callback.
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Delayed re-invocation on the caller's sequencing context.
///
/// Posting does not replace tasks that are already pending. `cancel_all`
/// drops every task that has not started running and is idempotent.
///
/// A scheduler belongs to exactly one coordinator: `cancel_all` reaches every
/// task posted through it, so sharing one instance lets a coordinator cancel
/// another's retries.
pub trait SchedulerPort: Send + Sync {
    fn post_delayed(&self, delay: Duration, task: ScheduledTask);
    fn cancel_all(&self);
}
