//! Request descriptor.

use super::endpoint::ApiKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default read timeout of a single call.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of one logical Diffbot call.
///
/// The relative URL (path plus encoded query, without the token) is built once here.
/// Two descriptors with identical parameters produce byte-identical relative URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: HttpMethod,
    kind: ApiKind,
    relative_url: String,
    read_timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// Build a descriptor from query parameters, encoded in insertion order.
    ///
    /// A zero `read_timeout` means no timeout.
    pub fn new<K, V>(
        method: HttpMethod,
        kind: ApiKind,
        params: impl IntoIterator<Item = (K, V)>,
        read_timeout: Duration,
    ) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in params {
            query.append_pair(k.as_ref(), v.as_ref());
        }
        let query = query.finish();
        let relative_url = if query.is_empty() {
            kind.path().to_string()
        } else {
            format!("{}?{}", kind.path(), query)
        };
        Self {
            method,
            kind,
            relative_url,
            read_timeout: (!read_timeout.is_zero()).then_some(read_timeout),
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn kind(&self) -> ApiKind {
        self.kind
    }

    /// Correlation key of the request inside a batch.
    pub fn relative_url(&self) -> &str {
        &self.relative_url
    }

    /// `None` when the call must wait indefinitely.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }
}
