use crate::shared::Result;
use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// PollScheduler - a fixed set of named, independently-timed periodic
/// tasks driving the live view.
///
/// Each registered task gets its own repeating timer; every tick invokes
/// the task fire-and-forget, whether or not the previous invocation has
/// resolved. Overlap is permitted - correctness of applying overlapping
/// results belongs to the reconciler's staleness guard, not to
/// serialization here. A failing tick is logged and the timer continues;
/// a panicking tick is contained by its own task.
///
/// `shutdown` cancels all timers; in-flight tick work is not awaited,
/// its resolutions are simply discarded if nothing is left to apply
/// them to.
///
/// Must be used from within a `tokio::task::LocalSet`, matching the
/// session's single logical thread of execution.
pub struct PollScheduler {
    cancel: CancellationToken,
    loops: RefCell<Vec<JoinHandle<()>>>,
}

impl PollScheduler {
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            loops: RefCell::new(Vec::new()),
        }
    }

    /// Token cancelled at shutdown; other session tasks (e.g. the input
    /// loop) can watch it to wind down together.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Arms a repeating timer named `name` firing every `every`.
    ///
    /// The first tick fires immediately, so freshly started views render
    /// without waiting a full interval.
    pub fn register<F, Fut>(&self, name: &'static str, every: Duration, task: F)
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<()>> + 'static,
    {
        let cancel = self.cancel.clone();
        let handle = tokio::task::spawn_local(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let tick = task();
                        tokio::task::spawn_local(async move {
                            if let Err(error) = tick.await {
                                warn!(task = name, %error, "poll tick failed");
                            }
                        });
                    }
                }
            }
            debug!(task = name, "poll loop stopped");
        });
        self.loops.borrow_mut().push(handle);
    }

    /// Cancels every timer. No tick is guaranteed to have quiesced when
    /// this returns.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
        for handle in self.loops.borrow_mut().drain(..) {
            handle.abort();
        }
    }
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new()
    }
}
