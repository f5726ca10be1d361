//! Batch dispatcher.

use crate::model::{BatchRequest, BatchResponse};
use crate::transport::BatchTransport;
use crate::{Error, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(300);

/// Issues exactly one combined call per batch. Never splits or merges batches and
/// never resolves results itself.
#[derive(Clone)]
pub struct BatchDispatcher {
    transport: Arc<dyn BatchTransport>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for BatchDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchDispatcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl BatchDispatcher {
    /// A zero `timeout` waits indefinitely.
    pub fn new(transport: Arc<dyn BatchTransport>, timeout: Duration) -> Self {
        Self {
            transport,
            timeout: (!timeout.is_zero()).then_some(timeout),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Send one batch and wait for its sub-responses.
    ///
    /// An elapsed timeout is reported as a retryable server error, like any other
    /// transport failure.
    pub async fn send(&self, requests: &[BatchRequest]) -> Result<Vec<BatchResponse>> {
        let batch_id = Uuid::new_v4();
        let start = Instant::now();
        let call = self.transport.send_batch(requests, self.timeout);

        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(Error::transport(format!(
                    "batch call timed out after {:?}",
                    limit
                ))),
            },
            None => call.await,
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(responses) => info!(
                batch_id = %batch_id,
                batch_size = requests.len(),
                responses = responses.len(),
                duration_ms,
                "batch call completed"
            ),
            Err(e) => warn!(
                batch_id = %batch_id,
                batch_size = requests.len(),
                http_status = e.status_code(),
                duration_ms,
                error = %e,
                "batch call failed"
            ),
        }
        result
    }

    /// Start sending a batch on the runtime and return immediately.
    pub fn send_async(&self, requests: Vec<BatchRequest>) -> BatchHandle {
        let dispatcher = self.clone();
        let size = requests.len();
        let task = tokio::spawn(async move { dispatcher.send(&requests).await });
        BatchHandle { task, size }
    }
}

/// A batch call running in the background.
#[derive(Debug)]
pub struct BatchHandle {
    task: JoinHandle<Result<Vec<BatchResponse>>>,
    size: usize,
}

impl BatchHandle {
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for completion. A panicked or cancelled task counts as a failed call.
    pub async fn join(self) -> Result<Vec<BatchResponse>> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(Error::transport(format!("batch task did not complete: {}", e))),
        }
    }
}
