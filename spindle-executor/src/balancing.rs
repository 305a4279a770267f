//! The work-balancing policy: workers proactively redistribute load between
//! random pairs of deques, and idle workers wait to be fed rather than steal.

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

/// A fixed pool of workers, one deque each, where a busy worker occasionally
/// pauses to equalize its deque against a random peer's instead of running a
/// task.
///
/// The pause is probabilistic with probability `1/(s+1)` for a local deque of
/// size `s`, so heavily loaded workers check more often in absolute terms.
/// A transfer happens only when the pair's size difference exceeds the balance
/// threshold, and then moves items one at a time until the sizes are equal.
pub struct WorkBalancingExecutor {
    core: Arc<PoolCore>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkBalancingExecutor {
    /// Create a pool with `capacity` workers and start them immediately.
    ///
    /// `queue_threshold` is the reserved batch-dequeue knob: recorded but
    /// inert. `balance_threshold` is the minimum size difference that
    /// justifies a transfer; the difference must strictly exceed it.
    ///
    /// # Errors
    ///
    /// Returns [`spindle_core::ExecutorError::InvalidCapacity`] if `capacity`
    /// is zero, and [`spindle_core::ExecutorError::SpawnFailed`] if a worker
    /// thread cannot be started.
    pub fn new(
        capacity: usize,
        queue_threshold: usize,
        balance_threshold: usize,
    ) -> ExecutorResult<Self> {
        let config = PoolConfig::new(capacity, queue_threshold);
        config.validate()?;

        let core = Arc::new(PoolCore::new(config));
        let workers = spawn_workers("spindle-balance", &core, move |index, core| {
            worker_loop(index, &core, balance_threshold);
        })?;

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

impl ExecutorService for WorkBalancingExecutor {
    fn submit(&self, task: Box<dyn Runnable>) {
        self.core.submit(task);
    }

    fn shutdown(&self) {
        self.core.request_shutdown();
        join_workers(&self.workers);
    }
}

impl Drop for WorkBalancingExecutor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(index: usize, core: &PoolCore, balance_threshold: usize) {
    let mut rng = rand::thread_rng();
    let mut backoff = Backoff::new();
    trace!(worker = index, "balancing worker started");

    loop {
        let size = core.deques[index].len();

        if size == 0 {
            if core.should_exit() {
                break;
            }
            // No self-initiated theft in this policy: an idle worker relies on
            // redistribution performed by its busy peers.
            backoff.snooze();
            continue;
        }

        // Balance with probability 1/(size + 1): draw in [0, size] and act
        // when the draw hits size.
        if rng.gen_range(0..=size) == size {
            let victim = rng.gen_range(0..core.config.capacity);
            rebalance(core, index, victim, balance_threshold);
            backoff = Backoff::new();
            continue;
        }

        // The size read above is already stale; a peer's rebalancing pass may
        // have emptied the deque, in which case the pop is a benign no-op.
        if let Ok(task) = core.deques[index].pop_top() {
            core.run_task(task);
            backoff = Backoff::new();
        }
    }

    trace!(worker = index, "balancing worker exited");
}

/// One pairwise rebalancing pass between this worker's deque and a random
/// victim's.
///
/// The pair is ordered by index only to fix which deque is which comparison
/// operand; the lighter/heavier labels are then assigned by observed size.
/// When the victim is the worker itself both labels name the same deque, the
/// difference is zero, and nothing moves.
fn rebalance(core: &PoolCore, index: usize, victim: usize, balance_threshold: usize) {
    core.metrics.balance_passes.fetch_add(1, Ordering::Relaxed);

    let (lo, hi) = if victim > index {
        (index, victim)
    } else {
        (victim, index)
    };
    let (first, second) = (&core.deques[lo], &core.deques[hi]);
    let (q_min, q_max) = if first.len() > second.len() {
        (second, first)
    } else {
        (first, second)
    };

    let diff = q_max.len().saturating_sub(q_min.len());
    if diff <= balance_threshold {
        return;
    }

    let mut moved = 0u64;
    while q_max.len() > q_min.len() {
        match q_max.pop_top() {
            Ok(task) => {
                q_min.push_bottom(task);
                moved += 1;
            }
            // A concurrent pass or the owner drained the heavier deque first.
            Err(_) => break,
        }
    }
    core.metrics.transfers.fetch_add(moved, Ordering::Relaxed);
    trace!(worker = index, victim, moved, "rebalanced pair");
}
