//! # Scheduler
//!
//! Deferred one-shot tasks. Order creation hands the fulfillment advances to
//! a [`Scheduler`] instead of spawning timers itself, so tests can swap in a
//! [`ManualScheduler`] and fast-forward.
//!
//! ## Two Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TokioScheduler                    ManualScheduler                      │
//! │  ──────────────                    ───────────────                      │
//! │  schedule(2s, task)                schedule(2s, task)                   │
//! │     │                                 │                                 │
//! │     ▼                                 ▼                                 │
//! │  tokio::spawn                      queue: [(due 2s, seq 0, task)]       │
//! │     sleep(2s).await                   │                                 │
//! │     task()                         advance(3s)                          │
//! │                                       ├── clock += 2s, task()           │
//! │                                       └── clock += 1s                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Neither implementation supports cancellation. Once scheduled, a task
//! either runs or is dropped with its runtime.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};

use crate::clock::ManualClock;

/// A deferred side effect.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs a task once after a delay.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Task);
}

// =============================================================================
// Tokio
// =============================================================================

/// Spawns each task onto the current tokio runtime behind a `sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, ?delay, "No tokio runtime; dropping scheduled task");
                return;
            }
        };

        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

// =============================================================================
// Manual
// =============================================================================

struct PendingTask {
    due: Duration,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct Queue {
    elapsed: Duration,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

/// Deterministic scheduler for tests. Time only moves in [`advance`].
///
/// Tasks fire in due-time order, ties in scheduling order. Before each task
/// runs, the paired [`ManualClock`] is moved to that task's due time, so
/// anything the task timestamps reads the moment it was due.
///
/// [`advance`]: ManualScheduler::advance
#[derive(Clone)]
pub struct ManualScheduler {
    queue: Arc<Mutex<Queue>>,
    clock: ManualClock,
}

impl ManualScheduler {
    pub fn new(clock: ManualClock) -> Self {
        ManualScheduler {
            queue: Arc::new(Mutex::new(Queue::default())),
            clock,
        }
    }

    /// The clock this scheduler moves.
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Time advanced so far.
    pub fn elapsed(&self) -> Duration {
        self.lock().elapsed
    }

    /// Tasks scheduled but not yet run.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Moves time forward by `by`, running every task that comes due.
    ///
    /// Tasks scheduled by a running task are picked up in the same call if
    /// they fall due within the window. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().elapsed.saturating_add(by);
        let mut fired = 0;

        loop {
            let next = {
                let mut queue = self.lock();
                let earliest = queue
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(index, _)| index);

                earliest.map(|index| {
                    let task = queue.pending.swap_remove(index);
                    let step = task.due.saturating_sub(queue.elapsed);
                    queue.elapsed = queue.elapsed.max(task.due);
                    (step, task)
                })
            };

            // Lock released: the task may schedule more work
            let Some((step, pending)) = next else { break };
            self.clock.advance(step);
            (pending.task)();
            fired += 1;
        }

        let mut queue = self.lock();
        let rest = target.saturating_sub(queue.elapsed);
        queue.elapsed = target;
        drop(queue);
        self.clock.advance(rest);

        debug!(fired, elapsed = ?target, "Manual scheduler advanced");
        fired
    }

    /// Runs everything queued, however far in the future.
    pub fn run_all(&self) -> usize {
        let last_due = self
            .lock()
            .pending
            .iter()
            .map(|p| p.due)
            .max()
            .unwrap_or_default();
        let remaining = last_due.saturating_sub(self.elapsed());
        self.advance(remaining)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let mut queue = self.lock();
        let due = queue.elapsed.saturating_add(delay);
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.pending.push(PendingTask { due, seq, task });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let make = move |name: &'static str| -> Task {
            let sink = sink.clone();
            Box::new(move || sink.lock().unwrap().push(name))
        };
        (log, make)
    }

    #[test]
    fn test_fires_in_due_order() {
        let scheduler = ManualScheduler::new(ManualClock::fixed());
        let (log, task) = recorder();

        scheduler.schedule(Duration::from_secs(8), task("c"));
        scheduler.schedule(Duration::from_secs(2), task("a"));
        scheduler.schedule(Duration::from_secs(5), task("b"));

        assert_eq!(scheduler.advance(Duration::from_secs(10)), 3);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let scheduler = ManualScheduler::new(ManualClock::fixed());
        let (log, task) = recorder();

        scheduler.schedule(Duration::from_secs(1), task("first"));
        scheduler.schedule(Duration::from_secs(1), task("second"));
        scheduler.advance(Duration::from_secs(1));

        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_partial_advance_leaves_later_tasks() {
        let scheduler = ManualScheduler::new(ManualClock::fixed());
        let (log, task) = recorder();

        scheduler.schedule(Duration::from_secs(2), task("a"));
        scheduler.schedule(Duration::from_secs(5), task("b"));

        assert_eq!(scheduler.advance(Duration::from_secs(3)), 1);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(Duration::from_secs(2)), 1);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_clock_reads_due_time_inside_task() {
        let clock = ManualClock::fixed();
        let start = clock.now();
        let scheduler = ManualScheduler::new(clock.clone());
        let seen = Arc::new(Mutex::new(None));

        let sink = seen.clone();
        let task_clock = clock.clone();
        scheduler.schedule(
            Duration::from_secs(2),
            Box::new(move || *sink.lock().unwrap() = Some(task_clock.now())),
        );
        scheduler.advance(Duration::from_secs(7));

        assert_eq!(seen.lock().unwrap().map(|t| t - start), Some(chrono::Duration::seconds(2)));
        assert_eq!(clock.now() - start, chrono::Duration::seconds(7));
        assert_eq!(scheduler.elapsed(), Duration::from_secs(7));
    }

    #[test]
    fn test_task_can_schedule_follow_up() {
        let scheduler = ManualScheduler::new(ManualClock::fixed());
        let count = Arc::new(AtomicUsize::new(0));

        let inner_scheduler = scheduler.clone();
        let inner_count = count.clone();
        scheduler.schedule(
            Duration::from_secs(1),
            Box::new(move || {
                inner_count.fetch_add(1, Ordering::SeqCst);
                let again = inner_count.clone();
                inner_scheduler.schedule(
                    Duration::from_secs(1),
                    Box::new(move || {
                        again.fetch_add(1, Ordering::SeqCst);
                    }),
                );
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_secs(2)), 2);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_run_all() {
        let scheduler = ManualScheduler::new(ManualClock::fixed());
        let (log, task) = recorder();

        scheduler.schedule(Duration::from_secs(60), task("late"));
        assert_eq!(scheduler.run_all(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["late"]);
        assert_eq!(scheduler.run_all(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_runs_after_delay() {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();

        TokioScheduler.schedule(
            Duration::from_secs(2),
            Box::new(move || {
                inner.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tokio_scheduler_without_runtime_drops_task() {
        TokioScheduler.schedule(Duration::from_secs(1), Box::new(|| panic!("must not run")));
    }
}
