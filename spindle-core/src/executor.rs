//! The executor contract shared by both load-distribution policies.

use crate::task::Runnable;

/// The interface both the work-stealing and work-balancing pools implement.
///
/// The contract is deliberately small: queue work, then shut down and wait for
/// the drain. There is no result channel — callers that need results close
/// over a shared accumulator of their own.
pub trait ExecutorService: Send + Sync {
    /// Queue a task for execution.
    ///
    /// Tasks are distributed round-robin across the workers' deques and the
    /// call returns immediately. Submissions are expected to stop once
    /// [`shutdown`](Self::shutdown) has been requested.
    ///
    /// Task bodies must not call `submit` on the pool executing them: bodies
    /// run inside the pool's shared critical section and the lock is not
    /// reentrant.
    fn submit(&self, task: Box<dyn Runnable>);

    /// Signal that no further submissions will arrive, then block until every
    /// worker thread has exited.
    ///
    /// Queued and in-flight work is never cancelled; this call returns only
    /// once the pending-task count has reached zero and all workers have
    /// terminated.
    fn shutdown(&self);
}

/// Convenience extensions over [`ExecutorService`].
pub trait ExecutorServiceExt: ExecutorService {
    /// Queue a bare closure for execution.
    fn submit_fn<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(Box::new(f));
    }
}

impl<E: ExecutorService + ?Sized> ExecutorServiceExt for E {}
