//! Per-endpoint request builders.

use crate::batch::PendingResult;
use crate::client::core::DiffbotClient;
use crate::model::{Article, Classified, Frontpage, FromModel, Images, PageType, Products};
use crate::protocol::{ApiKind, HttpMethod, RequestDescriptor};
use std::marker::PhantomData;
use std::time::Duration;

/// A result type bound to one Diffbot endpoint.
pub trait ApiModel: FromModel {
    const KIND: ApiKind;
}

/// Endpoints answering in JSON; they accept `fields` and `timeout`.
pub trait JsonModel: ApiModel {}

impl ApiModel for Article {
    const KIND: ApiKind = ApiKind::Article;
}
impl ApiModel for Frontpage {
    const KIND: ApiKind = ApiKind::Frontpage;
}
impl ApiModel for Images {
    const KIND: ApiKind = ApiKind::Images;
}
impl ApiModel for Products {
    const KIND: ApiKind = ApiKind::Products;
}
impl ApiModel for Classified {
    const KIND: ApiKind = ApiKind::Classifier;
}

impl JsonModel for Article {}
impl JsonModel for Images {}
impl JsonModel for Products {}
impl JsonModel for Classified {}

/// A request to one endpoint, built from a page URL.
///
/// Parameters are always encoded in the same order, so two requests built the same way
/// have the same relative URL.
#[derive(Debug, Clone)]
pub struct ApiRequest<T> {
    client: DiffbotClient,
    url: String,
    fields: Option<String>,
    timeout: Option<Duration>,
    mode: Option<PageType>,
    stats: bool,
    _kind: PhantomData<fn() -> T>,
}

impl<T: ApiModel> ApiRequest<T> {
    pub(crate) fn new(client: DiffbotClient, url: String) -> Self {
        Self {
            client,
            url,
            fields: None,
            timeout: None,
            mode: None,
            stats: false,
            _kind: PhantomData,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn client(&self) -> &DiffbotClient {
        &self.client
    }

    /// The wire form of this request.
    pub fn descriptor(&self) -> RequestDescriptor {
        let mut params: Vec<(&str, String)> = vec![("url", self.url.clone())];
        if T::KIND == ApiKind::Frontpage {
            params.push(("format", "xml".to_string()));
        }
        if let Some(fields) = &self.fields {
            params.push(("fields", fields.clone()));
        }
        if let Some(timeout) = self.timeout {
            params.push(("timeout", timeout.as_millis().to_string()));
        }
        if let Some(mode) = self.mode {
            params.push(("mode", mode.key().to_string()));
        }
        if self.stats {
            params.push(("stats", String::new()));
        }

        let read_timeout = self.timeout.unwrap_or(self.client.read_timeout());
        RequestDescriptor::new(HttpMethod::Get, T::KIND, params, read_timeout)
    }

    /// Queue the request for the next batch call. Nothing is sent until a
    /// [`PendingResult`] of this client is awaited.
    pub fn queue(self) -> PendingResult<T> {
        let descriptor = self.descriptor();
        self.client.inner.coordinator.enqueue(descriptor)
    }
}

impl<T: JsonModel> ApiRequest<T> {
    /// Limit or expand the returned fields, e.g. `meta,links,images(*)`.
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Override Diffbot's own extraction timeout. Also used as the read timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl ApiRequest<Classified> {
    /// Extract the page as `page_type` regardless of what the classifier decides.
    pub fn mode(mut self, page_type: PageType) -> Self {
        self.mode = Some(page_type);
        self
    }

    /// Include classification confidence and per-type scores.
    pub fn stats(mut self) -> Self {
        self.stats = true;
        self
    }
}
