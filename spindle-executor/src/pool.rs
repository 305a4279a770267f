//! State and bookkeeping shared by both executor policies.

use parking_lot::Mutex;
use spindle_core::error::{ExecutorError, ExecutorResult};
use spindle_core::{PoolConfig, Runnable};
use spindle_deque::Deque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, trace};

/// The fields guarded by the pool's shared lock.
///
/// The same lock also covers every task body (see [`PoolCore::run_locked`]),
/// so `pending` moves only inside the global critical section.
pub(crate) struct Shared {
    /// Tasks submitted so far minus tasks whose body has completed.
    pub pending: usize,
    /// Monotonic false-to-true; workers may exit once this is set and
    /// `pending` reaches zero.
    pub shutdown: bool,
    /// Round-robin submission cursor, always `< capacity`.
    pub next: usize,
}

/// Internal event counters.
#[derive(Default)]
pub(crate) struct PoolMetrics {
    pub executed: AtomicU64,
    pub steals: AtomicU64,
    pub balance_passes: AtomicU64,
    pub transfers: AtomicU64,
}

impl PoolMetrics {
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            executed: self.executed.load(Ordering::Relaxed),
            steals: self.steals.load(Ordering::Relaxed),
            balance_passes: self.balance_passes.load(Ordering::Relaxed),
            transfers: self.transfers.load(Ordering::Relaxed),
        }
    }
}

/// A snapshot of a pool's internal counters.
///
/// Counters irrelevant to a policy stay zero (a stealing pool never records
/// balance passes, and vice versa).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Task bodies run to completion (including panicked ones).
    pub executed: u64,
    /// Tasks taken from a peer's deque by an idle stealing worker.
    pub steals: u64,
    /// Rebalancing passes attempted, whether or not anything moved.
    pub balance_passes: u64,
    /// Individual items moved between deques by rebalancing.
    pub transfers: u64,
}

/// Everything both policies share: the deque array, the shared lock, and the
/// counters.
pub(crate) struct PoolCore {
    pub config: PoolConfig,
    /// One deque per worker, indexed 1:1.
    pub deques: Vec<Deque<Box<dyn Runnable>>>,
    pub shared: Mutex<Shared>,
    pub metrics: PoolMetrics,
}

impl PoolCore {
    pub fn new(config: PoolConfig) -> Self {
        let deques = (0..config.capacity).map(|_| Deque::new()).collect();
        Self {
            config,
            deques,
            shared: Mutex::new(Shared {
                pending: 0,
                shutdown: false,
                next: 0,
            }),
            metrics: PoolMetrics::default(),
        }
    }

    /// Round-robin submission under the shared lock.
    pub fn submit(&self, task: Box<dyn Runnable>) {
        let mut shared = self.shared.lock();
        let slot = shared.next;
        self.deques[slot].push_bottom(task);
        shared.pending += 1;
        shared.next = (slot + 1) % self.config.capacity;
        trace!(worker = slot, pending = shared.pending, "task queued");
    }

    /// Acquire the shared lock, then run the task inside it.
    pub fn run_task(&self, task: Box<dyn Runnable>) {
        let mut shared = self.shared.lock();
        self.run_locked(&mut shared, task);
    }

    /// Run a task body while the caller holds the shared lock, then record
    /// completion.
    ///
    /// At most one body runs pool-wide at any instant. A panicking body is
    /// contained here so the pending counter still reaches zero and shutdown
    /// can complete; the failure itself stays opaque to the executor.
    pub fn run_locked(&self, shared: &mut Shared, task: Box<dyn Runnable>) {
        if panic::catch_unwind(AssertUnwindSafe(|| task.run())).is_err() {
            error!("task body panicked");
        }
        shared.pending -= 1;
        self.metrics.executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Whether a worker observing an empty deque may exit permanently.
    pub fn should_exit(&self) -> bool {
        let shared = self.shared.lock();
        shared.shutdown && shared.pending == 0
    }

    pub fn request_shutdown(&self) {
        let mut shared = self.shared.lock();
        if !shared.shutdown {
            shared.shutdown = true;
            debug!(pending = shared.pending, "shutdown requested");
        }
    }
}

/// Start one thread per worker slot, each running `worker`.
///
/// On a failed spawn the workers already started are shut down and joined
/// before the error is surfaced, so a construction error never leaks spinning
/// threads.
pub(crate) fn spawn_workers<F>(
    name: &str,
    core: &Arc<PoolCore>,
    worker: F,
) -> ExecutorResult<Vec<JoinHandle<()>>>
where
    F: Fn(usize, Arc<PoolCore>) + Clone + Send + 'static,
{
    let mut handles = Vec::with_capacity(core.config.capacity);
    for index in 0..core.config.capacity {
        let worker_core = Arc::clone(core);
        let worker = worker.clone();
        let spawned = thread::Builder::new()
            .name(format!("{name}-{index}"))
            .spawn(move || worker(index, worker_core));
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(_) => {
                core.request_shutdown();
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(ExecutorError::SpawnFailed);
            }
        }
    }
    Ok(handles)
}

/// Join every worker handle, surfacing worker-thread panics in the log rather
/// than propagating them to the shutdown caller.
pub(crate) fn join_workers(workers: &Mutex<Vec<JoinHandle<()>>>) {
    let handles: Vec<_> = workers.lock().drain(..).collect();
    for handle in handles {
        if handle.join().is_err() {
            error!("worker thread panicked outside a task body");
        }
    }
}
