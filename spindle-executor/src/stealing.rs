//! The work-stealing policy: idle workers reactively take work from a random
//! peer's deque.

use crate::pool::{join_workers, spawn_workers, MetricsSnapshot, PoolCore};
use crossbeam_utils::Backoff;
use parking_lot::Mutex;
use rand::Rng;
use spindle_core::error::ExecutorResult;
use spindle_core::{ExecutorService, PoolConfig, Runnable};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::trace;

/// A fixed pool of workers, one deque each, where a worker whose own deque is
/// empty pops the top of a uniformly random peer's deque.
///
/// ```
/// use spindle_core::{ExecutorService, ExecutorServiceExt};
/// use spindle_executor::WorkStealingExecutor;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let pool = WorkStealingExecutor::new(2, 16).unwrap();
/// let counter = Arc::new(AtomicUsize::new(0));
/// for _ in 0..10 {
///     let counter = counter.clone();
///     pool.submit_fn(move || {
///         counter.fetch_add(1, Ordering::Relaxed);
///     });
/// }
/// pool.shutdown();
/// assert_eq!(counter.load(Ordering::Relaxed), 10);
/// ```
pub struct WorkStealingExecutor {
    core: Arc<PoolCore>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkStealingExecutor {
    /// Create a pool with `capacity` workers and start them immediately.
    ///
    /// `queue_threshold` is the reserved batch-dequeue knob: it is recorded in
    /// the pool configuration but does not affect scheduling.
    ///
    /// # Errors
    ///
    /// Returns [`spindle_core::ExecutorError::InvalidCapacity`] if `capacity`
    /// is zero, and [`spindle_core::ExecutorError::SpawnFailed`] if a worker
    /// thread cannot be started.
    pub fn new(capacity: usize, queue_threshold: usize) -> ExecutorResult<Self> {
        let config = PoolConfig::new(capacity, queue_threshold);
        config.validate()?;

        let core = Arc::new(PoolCore::new(config));
        let workers = spawn_workers("spindle-steal", &core, worker_loop)?;

        Ok(Self {
            core,
            workers: Mutex::new(workers),
        })
    }

    /// A snapshot of the pool's internal counters.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.core.metrics.snapshot()
    }
}

impl ExecutorService for WorkStealingExecutor {
    fn submit(&self, task: Box<dyn Runnable>) {
        self.core.submit(task);
    }

    fn shutdown(&self) {
        self.core.request_shutdown();
        join_workers(&self.workers);
    }
}

impl Drop for WorkStealingExecutor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(index: usize, core: Arc<PoolCore>) {
    let mut rng = rand::thread_rng();
    let mut backoff = Backoff::new();
    trace!(worker = index, "stealing worker started");

    loop {
        // Own work first. The single try-pop stands in for an emptiness check
        // followed by a pop: a peer may drain this deque at any moment, and a
        // failed pop just means the race was lost.
        if let Ok(task) = core.deques[index].pop_top() {
            core.run_task(task);
            backoff = Backoff::new();
            continue;
        }

        if core.should_exit() {
            break;
        }

        if core.config.capacity > 1 && steal_once(index, &core, &mut rng) {
            backoff = Backoff::new();
            continue;
        }

        backoff.snooze();
    }

    trace!(worker = index, "stealing worker exited");
}

/// One steal attempt against a uniformly random victim other than `index`.
///
/// The shared lock is held across the pop and the task body, so the victim's
/// top item cannot vanish between the two and execution stays serialized.
/// Returns whether a task was stolen and run.
fn steal_once(index: usize, core: &PoolCore, rng: &mut impl Rng) -> bool {
    let mut victim = rng.gen_range(0..core.config.capacity);
    while victim == index {
        victim = rng.gen_range(0..core.config.capacity);
    }

    let mut shared = core.shared.lock();
    match core.deques[victim].pop_top() {
        Ok(task) => {
            core.run_locked(&mut shared, task);
            core.metrics.steals.fetch_add(1, Ordering::Relaxed);
            trace!(worker = index, victim, "stole task");
            true
        }
        Err(_) => false,
    }
}
