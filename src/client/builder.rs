use crate::batch::{BatchCoordinator, BatchDispatcher, SlicePolicy, DEFAULT_BATCH_TIMEOUT};
use crate::client::core::{ClientInner, DiffbotClient};
use crate::protocol::request::DEFAULT_READ_TIMEOUT;
use crate::protocol::Endpoints;
use crate::transport::{BatchTransport, HttpTransport};
use crate::{Error, ErrorContext, Result};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Hard limit of the batch API.
pub const MAX_BATCH_REQUESTS_LIMIT: usize = 50;
pub const DEFAULT_MAX_BATCH_REQUESTS: usize = 25;

/// Builder for [`DiffbotClient`].
///
/// Unset values fall back to the environment, then to defaults:
/// - `DIFFBOT_TOKEN`
/// - `DIFFBOT_MAX_BATCH_REQUESTS` (default 25, 1 to 50)
/// - `DIFFBOT_BATCH_TIMEOUT_SECS` (default 300, 0 waits indefinitely)
/// - `DIFFBOT_READ_TIMEOUT_SECS` (default 20, 0 waits indefinitely)
/// - `DIFFBOT_CONCURRENT_BATCH_REQUESTS` (unset: one batch call per trigger)
/// - `DIFFBOT_PROXY_URL`
///
/// Every argument is validated in [`build`](Self::build); nothing is deferred to call time.
#[derive(Default)]
pub struct DiffbotClientBuilder {
    token: Option<String>,
    max_batch_requests: Option<usize>,
    batch_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    concurrent_batch_requests: Option<usize>,
    proxy_url: Option<String>,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
    transport: Option<Arc<dyn BatchTransport>>,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}

impl DiffbotClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diffbot developer token, sent with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Maximum number of sub-requests per batch call (1 to 50).
    pub fn max_batch_requests(mut self, n: usize) -> Self {
        self.max_batch_requests = Some(n);
        self
    }

    /// Timeout of a whole batch call. `Duration::ZERO` waits indefinitely.
    pub fn batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = Some(timeout);
        self
    }

    /// Default read timeout of single calls. `Duration::ZERO` waits indefinitely.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Send up to `n` batch calls at once when a queued result is awaited.
    pub fn concurrent_batch_requests(mut self, n: usize) -> Self {
        self.concurrent_batch_requests = Some(n);
        self
    }

    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    /// Route every endpoint, batch included, to one base URL.
    ///
    /// This is primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Replace the HTTP transport used for batch calls.
    pub fn transport(mut self, transport: Arc<dyn BatchTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<DiffbotClient> {
        let token = self
            .token
            .or_else(|| env::var("DIFFBOT_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "a Diffbot developer token is required",
                    ErrorContext::new()
                        .with_field_path("token")
                        .with_source("client_builder"),
                )
            })?;

        let max_batch_requests = self
            .max_batch_requests
            .or_else(|| env_parse("DIFFBOT_MAX_BATCH_REQUESTS"))
            .unwrap_or(DEFAULT_MAX_BATCH_REQUESTS);
        if !(1..=MAX_BATCH_REQUESTS_LIMIT).contains(&max_batch_requests) {
            return Err(Error::configuration_with_context(
                format!(
                    "max_batch_requests must be between 1 and {}, got {}",
                    MAX_BATCH_REQUESTS_LIMIT, max_batch_requests
                ),
                ErrorContext::new()
                    .with_field_path("max_batch_requests")
                    .with_source("client_builder"),
            ));
        }

        let concurrent_batch_requests = self
            .concurrent_batch_requests
            .or_else(|| env_parse("DIFFBOT_CONCURRENT_BATCH_REQUESTS"));
        let policy = match concurrent_batch_requests {
            None => SlicePolicy::Synchronous { max_batch_requests },
            Some(0) => {
                return Err(Error::configuration_with_context(
                    "concurrent_batch_requests must be at least 1",
                    ErrorContext::new()
                        .with_field_path("concurrent_batch_requests")
                        .with_source("client_builder"),
                ))
            }
            Some(n) => SlicePolicy::Concurrent {
                max_batch_requests,
                concurrent_batch_requests: n,
            },
        };

        let batch_timeout = self
            .batch_timeout
            .or_else(|| env_parse("DIFFBOT_BATCH_TIMEOUT_SECS").map(Duration::from_secs))
            .unwrap_or(DEFAULT_BATCH_TIMEOUT);
        let read_timeout = self
            .read_timeout
            .or_else(|| env_parse("DIFFBOT_READ_TIMEOUT_SECS").map(Duration::from_secs))
            .unwrap_or(DEFAULT_READ_TIMEOUT);

        let endpoints = match self.base_url_override {
            Some(base) => Endpoints::with_base_url(base),
            None => Endpoints::default(),
        };
        let proxy_url = self.proxy_url.or_else(|| env::var("DIFFBOT_PROXY_URL").ok());
        let http = Arc::new(HttpTransport::new(token, endpoints, proxy_url.as_deref())?);

        let batch_transport: Arc<dyn BatchTransport> = match self.transport {
            Some(t) => t,
            None => http.clone(),
        };
        let dispatcher = BatchDispatcher::new(batch_transport, batch_timeout);
        let coordinator = Arc::new(BatchCoordinator::new(dispatcher, policy));

        debug!(
            max_batch_requests,
            concurrent = policy.concurrent_batch_requests(),
            batch_timeout_secs = batch_timeout.as_secs(),
            "diffbot client built"
        );

        Ok(DiffbotClient {
            inner: Arc::new(ClientInner {
                transport: http,
                coordinator,
                read_timeout,
                batch_timeout: (!batch_timeout.is_zero()).then_some(batch_timeout),
            }),
        })
    }
}
