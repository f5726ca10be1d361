//! 单次请求执行：不经过批处理队列的直接调用。
//!
//! Single-call execution, bypassing the batch queue.

use crate::client::core::DiffbotClient;
use crate::client::request::{ApiModel, ApiRequest};
use crate::model::{decode, Model};
use crate::protocol::RequestDescriptor;
use crate::Result;
use tracing::debug;

impl DiffbotClient {
    /// One `GET` for one descriptor, decoded exactly like a batch sub-response body.
    pub(crate) async fn execute_once(&self, descriptor: &RequestDescriptor) -> Result<Model> {
        let raw = self.inner.transport.get(descriptor).await?;
        debug!(
            endpoint = descriptor.kind().as_str(),
            http_status = raw.status,
            body_len = raw.body.len(),
            "decoding single-call response"
        );
        decode(descriptor.kind(), raw.content_type.as_deref(), &raw.body)
    }
}

impl<T: ApiModel> ApiRequest<T> {
    /// Send the request now, outside of any batch.
    pub async fn execute(self) -> Result<T> {
        let descriptor = self.descriptor();
        let model = self.client().execute_once(&descriptor).await?;
        T::from_model(model)
    }
}
