use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use super::{
    Cancellable, CaseOpenCompleteEvent, CaseOpenEvent, CaseOpeningEventListener,
    CaseRewardAnnounceEvent, FailedCaseOpenEvent,
};

pub type SharedListener = Arc<dyn CaseOpeningEventListener>;

/// Outcome of dispatching a cancelable event, read after every listener ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Proceed,
    Cancelled,
}

impl Dispatch {
    pub fn is_cancelled(self) -> bool {
        self == Dispatch::Cancelled
    }

    fn of<E: Cancellable>(event: &E) -> Self {
        if event.is_cancelled() {
            Dispatch::Cancelled
        } else {
            Dispatch::Proceed
        }
    }
}

/// Ordered set of listeners, identified by `Arc` pointer.
///
/// The last registered listener runs last and therefore has the final say
/// on cancellation and on the announce message.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<Vec<SharedListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if this exact listener is already registered.
    pub fn register(&self, listener: SharedListener) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            log::warn!("Listener already registered, ignoring");
            return false;
        }
        listeners.push(listener);
        log::debug!("Registered case listener ({} total)", listeners.len());
        true
    }

    /// Returns `false` if the listener was not registered.
    pub fn unregister(&self, listener: &SharedListener) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|l| !Arc::ptr_eq(l, listener));
        before != listeners.len()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Listeners may (un)register from inside a hook, so never hold the lock
    // while they run.
    fn snapshot(&self) -> Vec<SharedListener> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn fire_case_open(&self, event: &mut CaseOpenEvent) -> Dispatch {
        for listener in self.snapshot() {
            listener.on_case_open(event);
        }
        let outcome = Dispatch::of(event);
        if outcome.is_cancelled() {
            log::debug!(
                "Case open of {} by {} cancelled by listener",
                event.case().case_id(),
                event.player_uuid()
            );
        }
        outcome
    }

    pub fn fire_case_open_complete(&self, event: &CaseOpenCompleteEvent) {
        for listener in self.snapshot() {
            listener.on_case_open_complete(event);
        }
    }

    pub fn fire_failed_case_open(&self, event: &FailedCaseOpenEvent) {
        for listener in self.snapshot() {
            listener.on_failed_case_open(event);
        }
    }

    pub fn fire_case_reward_announce(&self, event: &mut CaseRewardAnnounceEvent) -> Dispatch {
        for listener in self.snapshot() {
            listener.on_case_reward_announce(event);
        }
        Dispatch::of(event)
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}
