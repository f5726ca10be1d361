//! In-memory batch transport with scripted failures.

use async_trait::async_trait;
use diffbot_rust::model::{BatchRequest, BatchResponse};
use diffbot_rust::{BatchTransport, DiffbotClient, Error, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers every sub-request with an article whose title is the sub-request's
/// position in its batch. Sub-responses come back in reverse order.
pub struct ScriptedTransport {
    calls: Mutex<Vec<Vec<BatchRequest>>>,
    script: Mutex<VecDeque<Option<Error>>>,
    latency: Duration,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Self::with_failures(Vec::new())
    }

    /// The first calls fail with these errors, in order.
    pub fn with_failures(failures: Vec<Error>) -> Arc<Self> {
        Self::scripted(failures.into_iter().map(Some).collect())
    }

    /// Outcome of the first calls in call order: `None` answers, `Some` fails.
    pub fn scripted(script: Vec<Option<Error>>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(script.into()),
            latency: Duration::ZERO,
        })
    }

    pub fn with_latency(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
            latency,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_sizes(&self) -> Vec<usize> {
        self.calls.lock().unwrap().iter().map(Vec::len).collect()
    }

    pub fn sent_urls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .flatten()
            .map(|r| r.relative_url.clone())
            .collect()
    }
}

#[async_trait]
impl BatchTransport for ScriptedTransport {
    async fn send_batch(
        &self,
        requests: &[BatchRequest],
        _timeout: Option<Duration>,
    ) -> Result<Vec<BatchResponse>> {
        self.calls.lock().unwrap().push(requests.to_vec());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let scripted = self.script.lock().unwrap().pop_front().flatten();
        if let Some(err) = scripted {
            return Err(err);
        }
        Ok(requests
            .iter()
            .enumerate()
            .rev()
            .map(|(i, r)| {
                let body = serde_json::json!({ "type": "article", "title": i.to_string() });
                BatchResponse::new(r.relative_url.clone(), 200, "application/json", body.to_string())
            })
            .collect())
    }
}

pub fn client_with(
    transport: Arc<ScriptedTransport>,
    max_batch_requests: usize,
    concurrent: Option<usize>,
) -> DiffbotClient {
    let mut builder = DiffbotClient::builder()
        .token("test-token")
        .max_batch_requests(max_batch_requests)
        .transport(transport);
    if let Some(n) = concurrent {
        builder = builder.concurrent_batch_requests(n);
    }
    builder.build().expect("client builds")
}
