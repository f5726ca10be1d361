use crate::model::{BatchRequest, BatchResponse};
use crate::protocol::{Endpoints, RequestDescriptor};
use crate::transport::BatchTransport;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Proxy, RequestBuilder, StatusCode};
use std::env;
use std::time::{Duration, Instant};
use tracing::debug;

pub const USER_AGENT: &str = concat!("diffbot-rust/", env!("CARGO_PKG_VERSION"));

const TOKEN_PARAM: &str = "token";
const BATCH_PARAM: &str = "batch";

/// Status, content type and body of a single-call response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

pub struct HttpTransport {
    client: reqwest::Client,
    endpoints: Endpoints,
    token: String,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(token: impl Into<String>, endpoints: Endpoints, proxy_url: Option<&str>) -> Result<Self> {
        // Pool knobs stay env-only.
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(
                env::var("DIFFBOT_HTTP_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(16),
            )
            .pool_idle_timeout(Some(Duration::from_secs(
                env::var("DIFFBOT_HTTP_POOL_IDLE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(90),
            )));

        if let Some(proxy_url) = proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("proxy_url")
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            Error::configuration_with_context(
                format!("the HTTP client cannot be built: {}", e),
                ErrorContext::new().with_source("http_transport"),
            )
        })?;

        Ok(Self {
            client,
            endpoints,
            token: token.into(),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Every outbound request goes through here to carry the developer token.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.query(&[(TOKEN_PARAM, self.token.as_str())])
    }

    /// Single call: `GET` the descriptor's endpoint with its own read timeout.
    ///
    /// 401 becomes [`Error::Unauthorized`] and any other non-200 status
    /// [`Error::Server`]; the body of a 200 is returned undecoded.
    pub async fn get(&self, descriptor: &RequestDescriptor) -> Result<RawResponse> {
        let url = self
            .endpoints
            .resolve(descriptor.kind(), descriptor.relative_url());
        let mut request = self.authorize(self.client.get(&url));
        if let Some(timeout) = descriptor.read_timeout() {
            request = request.timeout(timeout);
        }

        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        debug!(
            endpoint = descriptor.kind().as_str(),
            http_status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "single call completed"
        );
        check_status(status)?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        Ok(RawResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

/// 401 is the only status with its own error kind; everything else but 200 is a server error.
pub(crate) fn check_status(status: StatusCode) -> Result<()> {
    match status.as_u16() {
        200 => Ok(()),
        401 => Err(Error::unauthorized(
            "the developer token is not recognized or has been revoked",
        )),
        code => Err(Error::server(
            code,
            status.canonical_reason().unwrap_or("unexpected status"),
        )),
    }
}

#[async_trait]
impl BatchTransport for HttpTransport {
    async fn send_batch(
        &self,
        requests: &[BatchRequest],
        timeout: Option<Duration>,
    ) -> Result<Vec<BatchResponse>> {
        let batch = serde_json::to_string(requests).map_err(|e| {
            Error::parse_with_context(
                format!("the batch request cannot be built: {}", e),
                ErrorContext::new().with_source("http_transport"),
            )
        })?;

        let mut request = self.authorize(
            self.client
                .post(self.endpoints.batch_url())
                .query(&[(BATCH_PARAM, batch.as_str())]),
        );
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        check_status(response.status())?;

        let body = response.text().await?;
        serde_json::from_str::<Vec<BatchResponse>>(&body)
            .map_err(|e| Error::transport(format!("the batch response cannot be parsed: {}", e)))
    }
}
