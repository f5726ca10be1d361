use crate::batch::{BatchCoordinator, SlicePolicy};
use crate::client::builder::DiffbotClientBuilder;
use crate::client::request::{ApiModel, ApiRequest};
use crate::model::{Article, Classified, Frontpage, Images, Products};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;

/// Client for the Diffbot APIs.
///
/// Clones share the same HTTP connection pool and the same batch queue.
#[derive(Clone, Debug)]
pub struct DiffbotClient {
    pub(crate) inner: Arc<ClientInner>,
}

#[derive(Debug)]
pub(crate) struct ClientInner {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) coordinator: Arc<BatchCoordinator>,
    pub(crate) read_timeout: Duration,
    pub(crate) batch_timeout: Option<Duration>,
}

impl DiffbotClient {
    pub fn builder() -> DiffbotClientBuilder {
        DiffbotClientBuilder::new()
    }

    fn request<T: ApiModel>(&self, url: impl Into<String>) -> ApiRequest<T> {
        ApiRequest::new(self.clone(), url.into())
    }

    /// Article API: main text, title, author, images and videos of an article page.
    pub fn article(&self, url: impl Into<String>) -> ApiRequest<Article> {
        self.request(url)
    }

    /// Frontpage API: the items of a home or index page, as DML.
    pub fn frontpage(&self, url: impl Into<String>) -> ApiRequest<Frontpage> {
        self.request(url)
    }

    /// Image API.
    pub fn images(&self, url: impl Into<String>) -> ApiRequest<Images> {
        self.request(url)
    }

    /// Product API.
    pub fn products(&self, url: impl Into<String>) -> ApiRequest<Products> {
        self.request(url)
    }

    /// Page Classifier API. With a mode it also extracts the page as that type.
    pub fn classifier(&self, url: impl Into<String>) -> ApiRequest<Classified> {
        self.request(url)
    }

    /// Requests queued and not yet part of a batch call.
    pub fn queue_len(&self) -> usize {
        self.inner.coordinator.queue_len()
    }

    pub fn slice_policy(&self) -> SlicePolicy {
        self.inner.coordinator.policy()
    }

    pub fn max_batch_requests(&self) -> usize {
        self.slice_policy().max_batch_requests()
    }

    /// Default read timeout of single calls.
    pub fn read_timeout(&self) -> Duration {
        self.inner.read_timeout
    }

    /// `None` when batch calls wait indefinitely.
    pub fn batch_timeout(&self) -> Option<Duration> {
        self.inner.batch_timeout
    }
}
