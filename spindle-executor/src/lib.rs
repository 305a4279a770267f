//! Executor implementations for the Spindle runtime.
//!
//! Two load-distribution policies over the same pool core:
//!
//! - [`WorkStealingExecutor`]: idle workers reactively pop from a random
//!   peer's deque.
//! - [`WorkBalancingExecutor`]: workers proactively equalize deque sizes
//!   between random pairs; idle workers wait to be fed instead of stealing.
//!
//! Both share the round-robin submitter, the pending-task counter used for
//! termination detection, and the single pool-wide lock under which every task
//! body runs. That coarse lock is load-bearing: the intended workload mutates
//! a shared accumulator with no synchronization of its own, so scheduling is
//! parallel while execution is serialized.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod balancing;
mod pool;
mod stealing;

pub use balancing::WorkBalancingExecutor;
pub use pool::MetricsSnapshot;
pub use stealing::WorkStealingExecutor;
