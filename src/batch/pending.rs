//! Pending results.

use super::coordinator::{BatchCoordinator, Trigger};
use crate::model::{FromModel, Model};
use crate::protocol::{ApiKind, RequestDescriptor};
use crate::{Error, Result};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// Lifecycle of one queued request.
#[derive(Debug, Clone)]
pub enum SlotState {
    /// Waiting in the queue.
    Queued,
    /// Part of a batch call that has not completed yet.
    InFlight,
    /// Terminal. Never replaced once set.
    Resolved(std::result::Result<Model, Error>),
}

impl SlotState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, SlotState::Resolved(_))
    }
}

/// Untyped placeholder shared by the queue, the batch in flight and the caller's handle.
pub struct PendingSlot {
    id: Uuid,
    descriptor: RequestDescriptor,
    state: watch::Sender<SlotState>,
}

impl fmt::Debug for PendingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSlot")
            .field("id", &self.id)
            .field("relative_url", &self.descriptor.relative_url())
            .field("state", &*self.state.borrow())
            .finish()
    }
}

impl PendingSlot {
    pub fn new(descriptor: RequestDescriptor) -> Arc<Self> {
        let (state, _) = watch::channel(SlotState::Queued);
        Arc::new(Self {
            id: Uuid::new_v4(),
            descriptor,
            state,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    pub fn relative_url(&self) -> &str {
        self.descriptor.relative_url()
    }

    pub fn state(&self) -> SlotState {
        self.state.borrow().clone()
    }

    pub fn is_resolved(&self) -> bool {
        self.state.borrow().is_resolved()
    }

    /// Set the terminal outcome. Returns `false` if the slot was already resolved.
    pub fn resolve(&self, outcome: std::result::Result<Model, Error>) -> bool {
        let mut outcome = Some(outcome);
        self.state.send_if_modified(|state| {
            if state.is_resolved() {
                return false;
            }
            if let Some(outcome) = outcome.take() {
                *state = SlotState::Resolved(outcome);
            }
            true
        })
    }

    // Waiters do not need waking for this transition.
    pub(crate) fn mark_in_flight(&self) {
        self.state.send_if_modified(|state| {
            if matches!(state, SlotState::Queued) {
                *state = SlotState::InFlight;
            }
            false
        });
    }

    /// Back in the queue; wakes waiters so one of them can trigger the next attempt.
    pub(crate) fn mark_queued(&self) {
        self.state.send_if_modified(|state| {
            if matches!(state, SlotState::InFlight) {
                *state = SlotState::Queued;
                true
            } else {
                false
            }
        });
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<SlotState> {
        self.state.subscribe()
    }
}

/// Handle to a queued request whose result arrives through a batch call.
///
/// Nothing is sent when the handle is created. [`wait`](Self::wait) is the one
/// operation that may dispatch: if the request is still queued, the calling task
/// performs the batch call that carries it. Once resolved, every read returns the
/// same value or error without touching the network.
pub struct PendingResult<T> {
    slot: Arc<PendingSlot>,
    coordinator: Arc<BatchCoordinator>,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Clone for PendingResult<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
            coordinator: Arc::clone(&self.coordinator),
            _kind: PhantomData,
        }
    }
}

impl<T> fmt::Debug for PendingResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingResult")
            .field("slot", &self.slot)
            .finish()
    }
}

impl<T: FromModel> PendingResult<T> {
    pub(crate) fn new(slot: Arc<PendingSlot>, coordinator: Arc<BatchCoordinator>) -> Self {
        Self {
            slot,
            coordinator,
            _kind: PhantomData,
        }
    }

    pub fn relative_url(&self) -> &str {
        self.slot.relative_url()
    }

    pub fn kind(&self) -> ApiKind {
        self.slot.descriptor().kind()
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.is_resolved()
    }

    /// The outcome if already resolved. Never dispatches.
    pub fn try_get(&self) -> Option<Result<T>> {
        match self.slot.state() {
            SlotState::Resolved(outcome) => Some(Self::convert(outcome)),
            _ => None,
        }
    }

    /// Await the result, triggering a batch call if the request is still queued.
    ///
    /// A failure of the combined call is returned as [`Error::Batch`] and leaves this
    /// request (and every other member of that batch) queued for the next attempt.
    /// Errors of the sub-request itself are returned unwrapped.
    pub async fn wait(&self) -> Result<T> {
        loop {
            let mut rx = self.slot.subscribe();
            if let SlotState::Resolved(outcome) = &*rx.borrow_and_update() {
                return Self::convert(outcome.clone());
            }

            match self.coordinator.run_batch(&self.slot).await {
                Ok(Trigger::Dispatched) => continue,
                Ok(Trigger::NotQueued) => {
                    // Another task holds it in flight; it will resolve or requeue.
                    if rx.changed().await.is_err() {
                        return Err(Error::transport("pending request was closed before resolution"));
                    }
                }
                Err(e) => return Err(Error::batch(e)),
            }
        }
    }

    fn convert(outcome: std::result::Result<Model, Error>) -> Result<T> {
        outcome.and_then(T::from_model)
    }
}
