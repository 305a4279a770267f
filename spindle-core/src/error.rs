//! Error types and handling for the Spindle runtime.

use thiserror::Error;

/// Errors that can occur constructing or driving an executor.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// The requested worker count was zero.
    #[error("executor capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
    /// A worker thread could not be spawned.
    #[error("failed to spawn worker thread")]
    SpawnFailed,
}

/// Errors that can occur operating on a deque.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DequeError {
    /// A pop was attempted on an empty deque.
    ///
    /// Callers that checked emptiness first must still treat this as "lost the
    /// race" — the deque has no compound atomicity across calls.
    #[error("deque is empty")]
    Empty,
}

/// A result type for executor operations.
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// A result type for deque operations.
pub type DequeResult<T> = Result<T, DequeError>;
