//! Batch response correlation.
//!
//! Diffbot gives sub-responses no id: the only link to a sub-request is the echoed
//! relative URL, and sub-responses may come back in any order.

use super::pending::PendingSlot;
use crate::model::{decode, BatchResponse, Model};
use crate::protocol::ApiKind;
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// What a correlation pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correlation {
    /// Members resolved by this pass, success or failure.
    pub resolved: usize,
    /// Relative URLs of sub-responses that matched no unresolved member.
    pub ignored: Vec<String>,
}

/// Resolve the members of `batch` from the sub-responses of its combined call.
///
/// Each sub-response goes to the first still-unresolved member with the same relative
/// URL, so duplicates resolve in submission order. A member is resolved at most once.
/// Members left without a sub-response stay unresolved for the caller to requeue.
pub fn correlate(responses: Vec<BatchResponse>, batch: &[Arc<PendingSlot>]) -> Correlation {
    let mut report = Correlation::default();

    for response in responses {
        let target = batch
            .iter()
            .find(|slot| !slot.is_resolved() && slot.relative_url() == response.relative_url);

        let Some(slot) = target else {
            warn!(
                relative_url = %response.relative_url,
                http_status = response.code,
                "sub-response matches no pending request, ignored"
            );
            report.ignored.push(response.relative_url);
            continue;
        };

        let outcome = sub_response_outcome(slot.descriptor().kind(), &response);
        debug!(
            relative_url = %response.relative_url,
            http_status = response.code,
            ok = outcome.is_ok(),
            "sub-response correlated"
        );
        if slot.resolve(outcome) {
            report.resolved += 1;
        }
    }
    report
}

/// Turn one sub-response into the outcome a single call would have produced.
pub fn sub_response_outcome(kind: ApiKind, response: &BatchResponse) -> Result<Model> {
    match response.code {
        200 => {}
        401 => {
            return Err(Error::unauthorized(
                "the developer token is not recognized or has been revoked",
            ))
        }
        code => {
            let message = if response.body.trim().is_empty() {
                "sub-request failed".to_string()
            } else {
                response.body.clone()
            };
            return Err(Error::server(code, message));
        }
    }

    if response.headers().is_empty() {
        return Err(Error::parse_with_context(
            "the sub-response carries no headers",
            ErrorContext::new()
                .with_details(response.relative_url.clone())
                .with_source("batch_correlator"),
        ));
    }

    let content_type = response.content_type();
    if content_type.is_none() && kind != ApiKind::Frontpage {
        return Err(Error::parse_with_context(
            "the sub-response has no Content-Type header",
            ErrorContext::new()
                .with_field_path("Content-Type")
                .with_details(response.relative_url.clone())
                .with_source("batch_correlator"),
        ));
    }

    decode(kind, content_type, &response.body)
}
