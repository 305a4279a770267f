//! Mutex-guarded double-ended work queue for the Spindle runtime.
//!
//! [`Deque`] is the one shared data structure workers and the submitter touch.
//! Each worker owns a deque: the owner pushes at the bottom and pops from the
//! top, while thieves and the balancer pop from the top (and the balancer
//! re-inserts at the bottom of a lighter peer).
//!
//! ## The relaxed contract
//!
//! Every operation acquires the deque's lock for its full duration, so each
//! call is individually atomic — but there is **no compound atomicity** across
//! calls. A caller that observes `!is_empty()` and then pops must tolerate an
//! `Err(Empty)` from the pop: another handle may have drained the deque in
//! between, and the failed pop simply means the caller lost the race. Both
//! scheduling policies are written against exactly this contract (optimistic
//! check, race-tolerant pop, benign no-op on failure), which keeps the data
//! structure itself simple.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use parking_lot::Mutex;
use spindle_core::error::{DequeError, DequeResult};
use std::collections::VecDeque;

/// A thread-safe double-ended queue with addressable "top" (head) and
/// "bottom" (tail) ends.
///
/// Within one deque, items pushed at the bottom come off the top in strict
/// FIFO order absent stealing or balancing interference.
pub struct Deque<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> Deque<T> {
    /// Create an empty deque.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }

    /// Insert an item at the bottom (tail).
    pub fn push_bottom(&self, item: T) {
        self.items.lock().push_back(item);
    }

    /// Remove and return the top (head) item.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque holds no items at the moment
    /// the lock is acquired.
    pub fn pop_top(&self) -> DequeResult<T> {
        self.items.lock().pop_front().ok_or(DequeError::Empty)
    }

    /// Remove and return the bottom (tail) item.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque holds no items at the moment
    /// the lock is acquired.
    pub fn pop_bottom(&self) -> DequeResult<T> {
        self.items.lock().pop_back().ok_or(DequeError::Empty)
    }

    /// Whether the deque currently holds no items.
    ///
    /// The answer is stale as soon as the lock is released; see the crate docs
    /// for the relaxed contract.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// The current number of items.
    ///
    /// A point-in-time estimate: other handles may mutate the deque the moment
    /// the lock is released. Valid for heuristic decisions (balancing
    /// triggers, transfer counts) only, never for correctness.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}
