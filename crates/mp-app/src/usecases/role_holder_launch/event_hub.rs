//! Observer list for coordinator events.

use std::sync::Mutex;

use mp_core::CoordinatorEvent;
use tokio::sync::mpsc;
use tracing::debug;

/// Fans every emitted event out to all live subscribers, in emission order.
///
/// Delivery is synchronous with `emit`: by the time `emit` returns, the event
/// is queued on every subscriber's channel. A new subscriber is seeded with
/// the most recent event, if there is one.
#[derive(Default)]
pub struct CoordinatorEventHub {
    state: Mutex<HubState>,
}

#[derive(Default)]
struct HubState {
    observers: Vec<mpsc::UnboundedSender<CoordinatorEvent>>,
    latest: Option<CoordinatorEvent>,
}

impl CoordinatorEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> EventSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.lock_state();
        if let Some(latest) = state.latest.clone() {
            let _ = tx.send(latest);
        }
        state.observers.push(tx);
        EventSubscription { rx }
    }

    pub fn emit(&self, event: CoordinatorEvent) {
        let mut state = self.lock_state();
        state.observers.retain(|tx| tx.send(event.clone()).is_ok());
        debug!(observers = state.observers.len(), ?event, "coordinator event emitted");
        state.latest = Some(event);
    }

    pub fn latest(&self) -> Option<CoordinatorEvent> {
        self.lock_state().latest.clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, HubState> {
        // The state stays consistent even if a holder panicked.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Receiving end of a hub subscription. Dropping it unsubscribes.
pub struct EventSubscription {
    rx: mpsc::UnboundedReceiver<CoordinatorEvent>,
}

impl EventSubscription {
    /// Waits for the next event. Returns `None` once the hub is gone and the
    /// backlog is drained.
    pub async fn recv(&mut self) -> Option<CoordinatorEvent> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<CoordinatorEvent> {
        self.rx.try_recv().ok()
    }

    /// Everything delivered so far, without waiting.
    pub fn drain(&mut self) -> Vec<CoordinatorEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
