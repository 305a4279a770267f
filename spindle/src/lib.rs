//! # Spindle
//!
//! A pluggable task-execution runtime offering two competing load-distribution
//! policies over the same primitive — one thread-safe double-ended queue per
//! worker:
//!
//! - **Work stealing** ([`WorkStealingExecutor`]): a worker whose own deque
//!   runs dry pops the top of a uniformly random peer's deque.
//! - **Work balancing** ([`WorkBalancingExecutor`]): busy workers occasionally
//!   pause to equalize their deque against a random peer's; idle workers wait
//!   to be fed.
//!
//! Both implement the [`ExecutorService`] contract: submit units of work, then
//! shut down and block until everything submitted has run. Submission is
//! round-robin across workers, there is no result channel, and every task body
//! runs inside a single pool-wide critical section so unsynchronized shared
//! accumulators in the tasks stay safe.
//!
//! ## Example
//!
//! ```
//! use spindle::{ExecutorService, ExecutorServiceExt};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let pool = spindle::work_stealing(4, 16).unwrap();
//! let counter = Arc::new(AtomicUsize::new(0));
//!
//! for _ in 0..40 {
//!     let counter = counter.clone();
//!     pool.submit_fn(move || {
//!         counter.fetch_add(1, Ordering::Relaxed);
//!     });
//! }
//!
//! pool.shutdown();
//! assert_eq!(counter.load(Ordering::Relaxed), 40);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use spindle_core::{
    DequeError, DequeResult, ExecutorError, ExecutorResult, ExecutorService, ExecutorServiceExt,
    PoolConfig, Runnable,
};
pub use spindle_deque::Deque;
pub use spindle_executor::{MetricsSnapshot, WorkBalancingExecutor, WorkStealingExecutor};

/// Construct a work-stealing pool with `capacity` workers.
///
/// `queue_threshold` is the reserved batch-dequeue knob carried for API
/// compatibility; it does not affect scheduling.
///
/// # Errors
///
/// Returns [`ExecutorError::InvalidCapacity`] if `capacity` is zero, and
/// [`ExecutorError::SpawnFailed`] if a worker thread cannot be started.
pub fn work_stealing(capacity: usize, queue_threshold: usize) -> ExecutorResult<WorkStealingExecutor> {
    WorkStealingExecutor::new(capacity, queue_threshold)
}

/// Construct a work-balancing pool with `capacity` workers.
///
/// `balance_threshold` is the minimum pairwise size difference that justifies
/// a transfer; the difference must strictly exceed it.
///
/// # Errors
///
/// Returns [`ExecutorError::InvalidCapacity`] if `capacity` is zero, and
/// [`ExecutorError::SpawnFailed`] if a worker thread cannot be started.
pub fn work_balancing(
    capacity: usize,
    queue_threshold: usize,
    balance_threshold: usize,
) -> ExecutorResult<WorkBalancingExecutor> {
    WorkBalancingExecutor::new(capacity, queue_threshold, balance_threshold)
}
