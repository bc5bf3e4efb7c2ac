use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Unit of work handed to a [`Scheduler`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Decides where completion callbacks of a
/// [`FutureResult`](super::FutureResult) run.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, task: Task);
}

impl<F> Scheduler for F
where
    F: Fn(Task) + Send + Sync,
{
    fn schedule(&self, task: Task) {
        self(task)
    }
}

/// Runs callbacks immediately on whichever thread resolved the result.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineScheduler;

impl Scheduler for InlineScheduler {
    fn schedule(&self, task: Task) {
        task()
    }
}

/// Runs callbacks on a tokio runtime, one at a time and in the order they
/// were scheduled, from a single drain task.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: UnboundedSender<Task>,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Task>();
        handle.spawn(async move {
            while let Some(task) = rx.recv().await {
                task();
            }
        });
        Self { tx }
    }

    /// Scheduler bound to the runtime of the calling context, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, task: Task) {
        if self.tx.send(task).is_err() {
            log::warn!("Tokio scheduler stopped, dropping scheduled callback");
        }
    }
}

/// Queue of callbacks drained by the host game loop, once per tick, on its
/// own thread.
///
/// ```
/// use case_api::deferred::{FutureResult, TickQueue};
/// use std::sync::Arc;
///
/// let mut queue = TickQueue::new();
/// let result = FutureResult::ready(7, Arc::new(queue.scheduler()));
/// result.when_complete(|n| assert_eq!(n, 7));
/// assert_eq!(queue.run_pending(), 1);
/// ```
#[derive(Debug)]
pub struct TickQueue {
    tx: UnboundedSender<Task>,
    rx: UnboundedReceiver<Task>,
}

impl TickQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn scheduler(&self) -> TickScheduler {
        TickScheduler {
            tx: self.tx.clone(),
        }
    }

    /// Runs every queued callback in FIFO order and returns how many ran.
    /// Callbacks queued while draining run in the same call.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }
}

impl Default for TickQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of a [`TickQueue`].
#[derive(Debug, Clone)]
pub struct TickScheduler {
    tx: UnboundedSender<Task>,
}

impl Scheduler for TickScheduler {
    fn schedule(&self, task: Task) {
        if self.tx.send(task).is_err() {
            log::warn!("Tick queue is gone, dropping scheduled callback");
        }
    }
}
