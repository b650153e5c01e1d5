//! Thread-safe ring queue with overwrite-oldest insertion.
//!
//! Producers never wait: inserting into a full queue discards the oldest
//! element. Consumers can block, block with a deadline, or poll.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use RingQueueMini::RingQueue;
//!
//! let queue = RingQueue::new(2).unwrap();
//! queue.insert(1);
//! queue.insert(2);
//! queue.insert(3); // drops 1
//!
//! assert_eq!(queue.remove(), 2);
//! assert_eq!(queue.remove_timeout(Duration::from_millis(10)), Ok(3));
//! assert!(queue.remove_timeout(Duration::ZERO).is_err());
//! ```

use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

pub use crate::core::{
    config::QueueConfig,
    error::{CapacityError, TimeoutError},
    queue::Ring,
    stats::QueueStats,
};
use crate::core::trace::{debug, trace};

/// Everything guarded by the queue lock.
struct State<T> {
    ring: Ring<T>,
    stats: QueueStats,
}

/// Fixed-capacity multi-producer, multi-consumer queue.
///
/// Share it between threads with `Arc<RingQueue<T>>`; every method takes
/// `&self`.
pub struct RingQueue<T> {
    capacity: usize,
    state: Mutex<State<T>>,
    available: Condvar,
}

impl<T> RingQueue<T> {
    /// Create an empty queue with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, CapacityError> {
        let ring = Ring::new(capacity)?;
        debug!(capacity, "ring queue created");
        Ok(Self {
            capacity,
            state: Mutex::new(State {
                ring,
                stats: QueueStats::default(),
            }),
            available: Condvar::new(),
        })
    }

    /// Create a queue sized by `config.capacity`.
    pub fn from_config(config: &QueueConfig) -> Result<Self, CapacityError> {
        Self::new(config.capacity)
    }

    /// Insert an element, silently discarding the oldest one if the queue is full.
    ///
    /// Never blocks and never fails.
    pub fn insert(&self, value: T) {
        drop(self.insert_evicting(value));
    }

    /// Like [`insert`](Self::insert), but hands back the element that was
    /// overwritten to make room, if any.
    pub fn insert_evicting(&self, value: T) -> Option<T> {
        let mut state = self.lock();
        let evicted = state.ring.push(value);
        state.stats.record_insert(evicted.is_some());
        if evicted.is_some() {
            trace!(capacity = self.capacity, "queue full, evicted oldest element");
        }
        self.available.notify_one();
        evicted
    }

    /// Remove the oldest element, blocking until one is available.
    pub fn remove(&self) -> T {
        let state = self.lock();
        let mut state = self
            .available
            .wait_while(state, |s| s.ring.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
        Self::take_oldest(&mut state)
    }

    /// Remove the oldest element, waiting at most `timeout` for one to arrive.
    ///
    /// # Errors
    ///
    /// Returns [`TimeoutError`] if the queue stayed empty for the whole
    /// window. Nothing is removed in that case.
    pub fn remove_timeout(&self, timeout: Duration) -> Result<T, TimeoutError> {
        let start = Instant::now();
        let state = self.lock();
        // The bound runs from entry, so time spent contending for the lock counts.
        // wait_timeout_while re-checks the predicate after spurious wakeups.
        let remaining = timeout.saturating_sub(start.elapsed());
        let (mut state, _) = self
            .available
            .wait_timeout_while(state, remaining, |s| s.ring.is_empty())
            .unwrap_or_else(PoisonError::into_inner);

        if state.ring.is_empty() {
            state.stats.record_timeout();
            let waited = start.elapsed();
            debug!(?waited, ?timeout, "remove timed out");
            return Err(TimeoutError { waited });
        }
        Ok(Self::take_oldest(&mut state))
    }

    /// Remove the oldest element if there is one, without waiting.
    pub fn try_remove(&self) -> Option<T> {
        let mut state = self.lock();
        let item = state.ring.pop();
        if item.is_some() {
            state.stats.record_remove();
        }
        item
    }

    /// Number of elements currently queued.
    ///
    /// A snapshot; other threads may change it as soon as this returns.
    pub fn count(&self) -> usize {
        self.lock().ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().ring.is_empty()
    }

    /// Fixed maximum number of elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the running totals.
    pub fn stats(&self) -> QueueStats {
        self.lock().stats
    }

    fn take_oldest(state: &mut State<T>) -> T {
        match state.ring.pop() {
            Some(item) => {
                state.stats.record_remove();
                item
            }
            // Callers only get here after waiting for a non-empty ring under the lock.
            None => unreachable!("ring emptied while the queue lock was held"),
        }
    }

    // Every critical section finishes its ring update before anything that
    // could panic, so a poisoned lock still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> fmt::Debug for RingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingQueue")
            .field("capacity", &self.capacity)
            .field("count", &self.count())
            .finish()
    }
}
