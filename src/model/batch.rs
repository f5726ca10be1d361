//! Batch API wire format.

use crate::protocol::{HttpMethod, RequestDescriptor};
use serde::{Deserialize, Serialize};

/// One sub-request of a batch call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub method: HttpMethod,
    /// e.g. `/v2/article?url=...`
    pub relative_url: String,
}

impl From<&RequestDescriptor> for BatchRequest {
    fn from(d: &RequestDescriptor) -> Self {
        Self {
            method: d.method(),
            relative_url: d.relative_url().to_string(),
        }
    }
}

/// One sub-response of a batch call.
///
/// Diffbot returns no correlation id: `relative_url` echoes the sub-request and the
/// order of sub-responses is not guaranteed to follow the order of sub-requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub headers: Option<Vec<Header>>,
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub relative_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }
}

impl BatchResponse {
    /// A sub-response carrying a single `Content-Type` header.
    pub fn new(
        relative_url: impl Into<String>,
        code: u16,
        content_type: &str,
        body: impl Into<String>,
    ) -> Self {
        Self {
            body: body.into(),
            headers: Some(vec![Header::new("Content-Type", content_type)]),
            code,
            relative_url: relative_url.into(),
        }
    }

    pub fn headers(&self) -> &[Header] {
        self.headers.as_deref().unwrap_or(&[])
    }

    /// First header with the given name, compared case-insensitively.
    pub fn first_header(&self, name: &str) -> Option<&Header> {
        self.headers().iter().find(|h| {
            h.name
                .as_deref()
                .map(|n| n.eq_ignore_ascii_case(name))
                .unwrap_or(false)
        })
    }

    pub fn content_type(&self) -> Option<&str> {
        self.first_header("Content-Type")
            .and_then(|h| h.value.as_deref())
    }
}
