//! Pool configuration.

use crate::error::{ExecutorError, ExecutorResult};

/// Configuration shared by both executor policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker threads, fixed for the lifetime of the pool.
    pub capacity: usize,
    /// Number of items a worker may claim from its deque in one batch.
    ///
    /// Reserved tuning knob: accepted and stored for API compatibility, but
    /// neither policy currently dequeues in batches.
    pub queue_threshold: usize,
}

impl PoolConfig {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(capacity: usize, queue_threshold: usize) -> Self {
        Self {
            capacity,
            queue_threshold,
        }
    }

    /// Check the configuration for values that can never work.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::InvalidCapacity`] if `capacity` is zero.
    pub const fn validate(&self) -> ExecutorResult<()> {
        if self.capacity == 0 {
            return Err(ExecutorError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}
