//! Batch slicing.
//!
//! Pure functions over the locked queue: given the request whose caller is waiting
//! (the initiator), decide which queued requests go into the next batch call(s).

use std::collections::VecDeque;

/// How a trigger turns queued requests into batch calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlicePolicy {
    /// One batch: the initiator followed by up to `max_batch_requests - 1` queued items.
    Synchronous { max_batch_requests: usize },
    /// Up to `concurrent_batch_requests` batches sent at once. The first one carries the
    /// initiator, placed last after up to `max_batch_requests - 1` items from the front.
    Concurrent {
        max_batch_requests: usize,
        concurrent_batch_requests: usize,
    },
}

impl SlicePolicy {
    pub fn max_batch_requests(&self) -> usize {
        match *self {
            SlicePolicy::Synchronous { max_batch_requests }
            | SlicePolicy::Concurrent {
                max_batch_requests, ..
            } => max_batch_requests.max(1),
        }
    }

    pub fn concurrent_batch_requests(&self) -> usize {
        match *self {
            SlicePolicy::Synchronous { .. } => 1,
            SlicePolicy::Concurrent {
                concurrent_batch_requests,
                ..
            } => concurrent_batch_requests.max(1),
        }
    }
}

fn take_front<T>(queue: &mut VecDeque<T>, n: usize) -> Vec<T> {
    let n = n.min(queue.len());
    queue.drain(..n).collect()
}

/// Remove the next batch(es) from `queue`.
///
/// Returns `None`, leaving the queue untouched, when no queued item satisfies
/// `is_initiator`: some other task already took it.
pub fn slice<T>(
    queue: &mut VecDeque<T>,
    is_initiator: impl Fn(&T) -> bool,
    policy: SlicePolicy,
) -> Option<Vec<Vec<T>>> {
    let position = queue.iter().position(is_initiator)?;
    let initiator = queue.remove(position)?;
    let max = policy.max_batch_requests();

    let batches = match policy {
        SlicePolicy::Synchronous { .. } => {
            let mut batch = Vec::with_capacity(max.min(queue.len() + 1));
            batch.push(initiator);
            batch.extend(take_front(queue, max - 1));
            vec![batch]
        }
        SlicePolicy::Concurrent { .. } => {
            let mut first = take_front(queue, max - 1);
            first.push(initiator);
            let mut batches = vec![first];
            while batches.len() < policy.concurrent_batch_requests() && !queue.is_empty() {
                batches.push(take_front(queue, max));
            }
            batches
        }
    };
    Some(batches)
}
