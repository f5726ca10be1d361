//! Batch coordination: the caller that awaits an unresolved result pays for the call.

use super::correlator::correlate;
use super::dispatcher::BatchDispatcher;
use super::pending::{PendingResult, PendingSlot};
use super::queue::PendingQueue;
use super::slicer::{slice, SlicePolicy};
use crate::model::{BatchRequest, FromModel};
use crate::protocol::RequestDescriptor;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of [`BatchCoordinator::run_batch`] when no combined call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The initiator went out in a batch call that completed.
    Dispatched,
    /// The initiator was not queued: another task has it in flight.
    NotQueued,
}

/// Owns the queue of one client and runs batch calls on behalf of waiting callers.
#[derive(Debug)]
pub struct BatchCoordinator {
    queue: PendingQueue<Arc<PendingSlot>>,
    dispatcher: BatchDispatcher,
    policy: SlicePolicy,
}

impl BatchCoordinator {
    pub fn new(dispatcher: BatchDispatcher, policy: SlicePolicy) -> Self {
        Self {
            queue: PendingQueue::new(),
            dispatcher,
            policy,
        }
    }

    pub fn policy(&self) -> SlicePolicy {
        self.policy
    }

    /// Requests waiting for a batch call. In-flight requests are not counted.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Queue a request and hand back its typed placeholder. Nothing is sent.
    pub fn enqueue<T: FromModel>(self: &Arc<Self>, descriptor: RequestDescriptor) -> PendingResult<T> {
        let slot = PendingSlot::new(descriptor);
        let queued = self.queue.enqueue(Arc::clone(&slot));
        debug!(
            relative_url = slot.relative_url(),
            queued,
            "request queued for batch"
        );
        PendingResult::new(slot, Arc::clone(self))
    }

    /// Send the batch(es) carrying `initiator`, then correlate or requeue each of them.
    ///
    /// Only the outcome of the initiator's own batch is returned; failures of sibling
    /// batches (concurrent policy) are logged and their members requeued.
    pub async fn run_batch(&self, initiator: &Arc<PendingSlot>) -> Result<Trigger> {
        let policy = self.policy;
        let sliced = self.queue.with_locked(|queue| {
            let batches = slice(queue, |slot| Arc::ptr_eq(slot, initiator), policy)?;
            for slot in batches.iter().flatten() {
                slot.mark_in_flight();
            }
            Some(batches)
        });
        let Some(batches) = sliced else {
            return Ok(Trigger::NotQueued);
        };
        debug!(
            batches = batches.len(),
            remaining = self.queue.len(),
            "queue sliced"
        );

        let mut batches = batches.into_iter();
        let Some(first) = batches.next() else {
            return Ok(Trigger::NotQueued);
        };

        let first = InFlight::new(&self.queue, first);
        let siblings: Vec<_> = batches
            .map(|batch| {
                let handle = self.dispatcher.send_async(batch_requests(&batch));
                (InFlight::new(&self.queue, batch), handle)
            })
            .collect();

        // The initiator's batch runs on this task; siblings already run in the background.
        let outcome = self.dispatcher.send(&first.requests()).await;
        let result = first.settle(outcome);

        for (batch, handle) in siblings {
            if let Err(e) = batch.settle(handle.join().await) {
                warn!(error = %e, "concurrent batch failed, members requeued");
            }
        }

        result?;
        if initiator.is_resolved() {
            Ok(Trigger::Dispatched)
        } else {
            Err(Error::transport(format!(
                "the batch response carried no sub-response for {}",
                initiator.relative_url()
            )))
        }
    }
}

fn batch_requests(batch: &[Arc<PendingSlot>]) -> Vec<BatchRequest> {
    batch
        .iter()
        .map(|slot| BatchRequest::from(slot.descriptor()))
        .collect()
}

/// A batch taken off the queue. Goes back to the queue unless settled, so a waiter
/// dropped mid-call cannot lose its batch.
struct InFlight<'a> {
    queue: &'a PendingQueue<Arc<PendingSlot>>,
    batch: Option<Vec<Arc<PendingSlot>>>,
}

impl<'a> InFlight<'a> {
    fn new(queue: &'a PendingQueue<Arc<PendingSlot>>, batch: Vec<Arc<PendingSlot>>) -> Self {
        Self {
            queue,
            batch: Some(batch),
        }
    }

    fn requests(&self) -> Vec<BatchRequest> {
        self.batch.as_deref().map(batch_requests).unwrap_or_default()
    }

    /// Correlate on success; requeue the whole batch on failure.
    fn settle(mut self, outcome: Result<Vec<crate::model::BatchResponse>>) -> Result<()> {
        let batch = self.batch.take().unwrap_or_default();
        match outcome {
            Ok(responses) => {
                let report = correlate(responses, &batch);
                let unanswered: Vec<_> = batch.into_iter().filter(|s| !s.is_resolved()).collect();
                if !unanswered.is_empty() {
                    warn!(
                        resolved = report.resolved,
                        unanswered = unanswered.len(),
                        "batch response left requests unanswered, requeued"
                    );
                    requeue(self.queue, unanswered);
                }
                Ok(())
            }
            Err(e) => {
                requeue(self.queue, batch);
                Err(e)
            }
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(batch) = self.batch.take() {
            requeue(self.queue, batch);
        }
    }
}

// The state flips back to Queued under the queue lock, the same lock the slicer holds
// while marking slots in flight, so a slot visible in the queue is never InFlight.
fn requeue(queue: &PendingQueue<Arc<PendingSlot>>, batch: Vec<Arc<PendingSlot>>) {
    let batch: Vec<_> = batch.into_iter().filter(|s| !s.is_resolved()).collect();
    queue.return_to_front_with(batch, |slot| slot.mark_queued());
}
