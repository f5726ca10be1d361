//! Pending queue.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// FIFO of requests waiting for a batch call.
///
/// Each operation is one short critical section; the lock is never held across I/O.
#[derive(Debug)]
pub struct PendingQueue<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> Default for PendingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PendingQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }

    // Poisoning is ignored: no operation leaves the deque half-mutated.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append at the back. Returns the new length.
    pub fn enqueue(&self, item: T) -> usize {
        let mut items = self.lock();
        items.push_back(item);
        items.len()
    }

    /// Remove and return up to `max_count` items from the front, in order.
    pub fn drain_prefix(&self, max_count: usize) -> Vec<T> {
        let mut items = self.lock();
        let n = max_count.min(items.len());
        items.drain(..n).collect()
    }

    /// Put a previously drained batch back ahead of everything queued meanwhile.
    pub fn return_to_front(&self, batch: Vec<T>) {
        self.return_to_front_with(batch, |_| {});
    }

    /// Like [`return_to_front`](Self::return_to_front), calling `on_return` for each item
    /// inside the same critical section that puts it back.
    pub fn return_to_front_with(&self, batch: Vec<T>, mut on_return: impl FnMut(&T)) {
        if batch.is_empty() {
            return;
        }
        let mut items = self.lock();
        for item in batch.into_iter().rev() {
            on_return(&item);
            items.push_front(item);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` against the locked deque. Used by the slicer so locating the initiator
    /// and draining happen in one critical section.
    pub(crate) fn with_locked<R>(&self, f: impl FnOnce(&mut VecDeque<T>) -> R) -> R {
        let mut items = self.lock();
        f(&mut items)
    }
}
