use std::fmt;
use std::future::Future;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use super::scheduler::Scheduler;
use crate::error::{CaseApiError, CaseApiResult};

type Listener<T> = Box<dyn FnOnce(&CaseApiResult<T>) + Send>;

enum State<T> {
    Pending(Vec<Listener<T>>),
    Resolved(CaseApiResult<T>),
}

struct Shared<T> {
    state: Mutex<State<T>>,
    resolved: Condvar,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone> Shared<T> {
    fn new() -> Self {
        Self {
            state: Mutex::new(State::Pending(Vec::new())),
            resolved: Condvar::new(),
        }
    }

    /// First resolution wins. Listeners run after the lock is released.
    fn resolve(&self, outcome: CaseApiResult<T>) -> bool {
        let listeners = {
            let mut state = lock(&self.state);
            let listeners = match &mut *state {
                State::Resolved(_) => return false,
                State::Pending(listeners) => std::mem::take(listeners),
            };
            *state = State::Resolved(outcome.clone());
            listeners
        };
        self.resolved.notify_all();
        for listener in listeners {
            listener(&outcome);
        }
        true
    }

    fn subscribe(&self, listener: Listener<T>) {
        let mut state = lock(&self.state);
        let outcome = match &mut *state {
            State::Pending(listeners) => {
                listeners.push(listener);
                return;
            }
            State::Resolved(outcome) => outcome.clone(),
        };
        drop(state);
        listener(&outcome);
    }
}

/// Resolving half of a pending [`FutureResult`].
///
/// Dropping it without resolving fails the result with
/// [`CaseApiError::Abandoned`].
pub struct Completer<T: Clone> {
    shared: Option<Arc<Shared<T>>>,
}

impl<T: Clone> Completer<T> {
    pub fn complete(mut self, value: T) -> bool {
        self.resolve(Ok(value))
    }

    pub fn fail(mut self, err: CaseApiError) -> bool {
        self.resolve(Err(err))
    }

    fn resolve(&mut self, outcome: CaseApiResult<T>) -> bool {
        match self.shared.take() {
            Some(shared) => shared.resolve(outcome),
            None => false,
        }
    }
}

impl<T: Clone> Drop for Completer<T> {
    fn drop(&mut self) {
        if self.resolve(Err(CaseApiError::Abandoned)) {
            log::debug!("Completer dropped before resolving its result");
        }
    }
}

/// Result of an operation backed by off-thread state, with callbacks routed
/// through a [`Scheduler`] chosen by whoever created it (typically the host
/// server's tick thread).
///
/// Callbacks registered on one result run once each, in registration order.
pub struct FutureResult<T: Clone> {
    shared: Arc<Shared<T>>,
    scheduler: Arc<dyn Scheduler>,
}

impl<T> FutureResult<T>
where
    T: Clone + Send + 'static,
{
    pub fn pending(scheduler: Arc<dyn Scheduler>) -> (Completer<T>, Self) {
        let shared = Arc::new(Shared::new());
        let completer = Completer {
            shared: Some(Arc::clone(&shared)),
        };
        (completer, Self { shared, scheduler })
    }

    pub fn ready(value: T, scheduler: Arc<dyn Scheduler>) -> Self {
        let (completer, result) = Self::pending(scheduler);
        completer.complete(value);
        result
    }

    pub fn failed(err: CaseApiError, scheduler: Arc<dyn Scheduler>) -> Self {
        let (completer, result) = Self::pending(scheduler);
        completer.fail(err);
        result
    }

    /// Drives `future` on `handle` and resolves with its output.
    pub fn spawn<F>(handle: &Handle, scheduler: Arc<dyn Scheduler>, future: F) -> Self
    where
        F: Future<Output = CaseApiResult<T>> + Send + 'static,
    {
        let (completer, result) = Self::pending(scheduler);
        handle.spawn(async move {
            match future.await {
                Ok(value) => completer.complete(value),
                Err(err) => completer.fail(err),
            };
        });
        result
    }

    pub fn is_resolved(&self) -> bool {
        matches!(*lock(&self.shared.state), State::Resolved(_))
    }

    /// Schedules `on_success` once the value is available. Nothing runs if
    /// the computation fails.
    pub fn when_complete<F>(&self, on_success: F)
    where
        F: FnOnce(T) + Send + 'static,
    {
        let scheduler = Arc::clone(&self.scheduler);
        self.shared.subscribe(Box::new(move |outcome| match outcome {
            Ok(value) => {
                let value = value.clone();
                scheduler.schedule(Box::new(move || on_success(value)));
            }
            Err(err) => log::debug!("Deferred result failed with no failure callback: {err}"),
        }));
    }

    /// Schedules exactly one of `on_success` or `on_failure`.
    pub fn when_complete_or_else<F, E>(&self, on_success: F, on_failure: E)
    where
        F: FnOnce(T) + Send + 'static,
        E: FnOnce(CaseApiError) + Send + 'static,
    {
        let scheduler = Arc::clone(&self.scheduler);
        self.shared.subscribe(Box::new(move |outcome| {
            let outcome = outcome.clone();
            scheduler.schedule(Box::new(move || match outcome {
                Ok(value) => on_success(value),
                Err(err) => on_failure(err),
            }));
        }));
    }

    /// Blocks the calling thread until the result resolves.
    ///
    /// Never call this from the thread that drains the result's scheduler
    /// while the backing work needs that thread.
    pub fn join(&self) -> CaseApiResult<T> {
        let mut state = lock(&self.shared.state);
        loop {
            if let State::Resolved(outcome) = &*state {
                return outcome.clone();
            }
            state = self
                .shared
                .resolved
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Plain future resolving to the same outcome, bypassing the scheduler.
    pub fn as_future(&self) -> BoxFuture<'static, CaseApiResult<T>> {
        let (tx, rx) = oneshot::channel();
        self.shared.subscribe(Box::new(move |outcome| {
            let _ = tx.send(outcome.clone());
        }));
        async move { rx.await.unwrap_or(Err(CaseApiError::Abandoned)) }.boxed()
    }

    /// Derived result on the same scheduler.
    pub fn map<U, F>(&self, f: F) -> FutureResult<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let (completer, mapped) = FutureResult::pending(Arc::clone(&self.scheduler));
        self.shared.subscribe(Box::new(move |outcome| match outcome {
            Ok(value) => {
                completer.complete(f(value.clone()));
            }
            Err(err) => {
                completer.fail(err.clone());
            }
        }));
        mapped
    }
}

impl<T: Clone> Clone for FutureResult<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            scheduler: Arc::clone(&self.scheduler),
        }
    }
}

impl<T: Clone> fmt::Debug for FutureResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved = matches!(*lock(&self.shared.state), State::Resolved(_));
        f.debug_struct("FutureResult")
            .field("resolved", &resolved)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deferred::{InlineScheduler, TickQueue, TokioScheduler};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    fn inline() -> Arc<dyn Scheduler> {
        Arc::new(InlineScheduler)
    }

    #[test]
    fn test_join_on_resolved_returns_value() {
        let result = FutureResult::ready(42u32, inline());
        assert!(result.is_resolved());
        assert_eq!(result.join(), Ok(42));
        assert_eq!(result.join(), Ok(42));
    }

    #[test]
    fn test_join_blocks_until_completed() {
        let (completer, result) = FutureResult::<String>::pending(inline());
        let worker = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            completer.complete("done".to_string());
        });
        assert_eq!(result.join(), Ok("done".to_string()));
        worker.join().unwrap();
    }

    #[test]
    fn test_join_propagates_failure() {
        let result: FutureResult<u32> =
            FutureResult::failed(CaseApiError::StorageError("offline".into()), inline());
        assert_eq!(
            result.join(),
            Err(CaseApiError::StorageError("offline".into()))
        );
    }

    #[test]
    fn test_success_callback_runs_exactly_once_on_scheduler() {
        let mut queue = TickQueue::new();
        let (completer, result) = FutureResult::pending(Arc::new(queue.scheduler()));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        result.when_complete(move |v: u32| {
            assert_eq!(v, 3);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        completer.complete(3);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(queue.run_pending(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(queue.run_pending(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_success_only_callback_skipped_on_failure() {
        let mut queue = TickQueue::new();
        let result: FutureResult<u32> =
            FutureResult::failed(CaseApiError::Abandoned, Arc::new(queue.scheduler()));
        result.when_complete(|_| panic!("success callback must not run"));
        assert_eq!(queue.run_pending(), 0);
    }

    #[test]
    fn test_failure_branch_replaces_success() {
        let mut queue = TickQueue::new();
        let (completer, result) = FutureResult::<u32>::pending(Arc::new(queue.scheduler()));
        let failures = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&failures);
        result.when_complete_or_else(
            |_| panic!("success callback must not run"),
            move |err| {
                assert_eq!(err, CaseApiError::UnknownCase("vote".into()));
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );
        completer.fail(CaseApiError::UnknownCase("vote".into()));
        assert_eq!(queue.run_pending(), 1);
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_two_arg_form_success_skips_failure() {
        let result = FutureResult::ready(1u32, inline());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        result.when_complete_or_else(
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            |_| panic!("failure callback must not run"),
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callbacks_run_in_registration_order() {
        let mut queue = TickQueue::new();
        let (completer, result) = FutureResult::pending(Arc::new(queue.scheduler()));
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..4 {
            let order = Arc::clone(&order);
            result.when_complete(move |_: ()| order.lock().unwrap().push(i));
        }
        completer.complete(());
        queue.run_pending();
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_first_resolution_wins() {
        let (completer, result) = FutureResult::<u32>::pending(inline());
        assert!(completer.complete(1));
        assert!(!result.shared.resolve(Ok(2)));
        assert_eq!(result.join(), Ok(1));
    }

    #[test]
    fn test_dropped_completer_abandons() {
        let (completer, result) = FutureResult::<u32>::pending(inline());
        drop(completer);
        assert_eq!(result.join(), Err(CaseApiError::Abandoned));
    }

    #[test]
    fn test_callback_may_join_same_result() {
        let result = FutureResult::ready(9u32, inline());
        let inner = result.clone();
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&seen);
        result.when_complete(move |_| {
            sink.store(inner.join().unwrap() as usize, Ordering::SeqCst);
        });
        assert_eq!(seen.load(Ordering::SeqCst), 9);
    }

    #[test]
    fn test_map() {
        let (completer, result) = FutureResult::<u32>::pending(inline());
        let doubled = result.map(|v| v * 2);
        completer.complete(21);
        assert_eq!(doubled.join(), Ok(42));

        let failed: FutureResult<u32> = FutureResult::failed(CaseApiError::Abandoned, inline());
        assert_eq!(failed.map(|v| v + 1).join(), Err(CaseApiError::Abandoned));
    }

    #[tokio::test]
    async fn test_as_future_preserves_value() {
        let (completer, result) = FutureResult::<Vec<u8>>::pending(inline());
        let fut = result.as_future();
        completer.complete(vec![1, 2, 3]);
        assert_eq!(fut.await, Ok(vec![1, 2, 3]));
        assert_eq!(result.as_future().await, Ok(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_spawn_resolves_from_runtime() {
        let scheduler: Arc<dyn Scheduler> = Arc::new(TokioScheduler::current().unwrap());
        let result = FutureResult::spawn(&Handle::current(), scheduler, async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok::<_, CaseApiError>(11u64)
        });
        assert_eq!(result.as_future().await, Ok(11));
        assert!(result.is_resolved());
    }

    #[tokio::test]
    async fn test_spawn_propagates_error() {
        let result: FutureResult<u64> = FutureResult::spawn(&Handle::current(), inline(), async {
            Err(CaseApiError::StorageError("db down".into()))
        });
        assert_eq!(
            result.as_future().await,
            Err(CaseApiError::StorageError("db down".into()))
        );
    }
}
