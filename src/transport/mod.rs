//! 传输层：基于 reqwest 的 HTTP 传输与批量调用抽象。
//!
//! HTTP transport and the batch-call seam.
//!
//! [`HttpTransport`] owns the reqwest client, attaches the developer token and user
//! agent to every outbound request, and classifies response statuses. The batch layer
//! only depends on the [`BatchTransport`] trait, so tests can swap in a scripted
//! transport without a network.

pub mod http;

pub use http::{HttpTransport, RawResponse, USER_AGENT};

use crate::model::{BatchRequest, BatchResponse};
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Sends one combined batch call.
#[async_trait]
pub trait BatchTransport: Send + Sync {
    /// Issue exactly one outbound call carrying every sub-request, in order.
    ///
    /// Implementations return the sub-responses as delivered by the service (order not
    /// guaranteed) or a `Server`/`Unauthorized` error when the combined call failed.
    async fn send_batch(
        &self,
        requests: &[BatchRequest],
        timeout: Option<Duration>,
    ) -> Result<Vec<BatchResponse>>;
}
