//! 客户端：Diffbot 客户端、构建器与各端点请求。
//!
//! Client for the Diffbot extraction APIs.
//!
//! A [`DiffbotClient`] is built once through [`DiffbotClientBuilder`] and shared (it is
//! cheap to clone). Each endpoint accessor returns an [`ApiRequest`] that is either
//! executed right away as a single call or queued for the next batch call.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
mod execution;
pub mod request;

pub use self::builder::{DiffbotClientBuilder, DEFAULT_MAX_BATCH_REQUESTS, MAX_BATCH_REQUESTS_LIMIT};
pub use self::core::DiffbotClient;
pub use self::request::{ApiModel, ApiRequest, JsonModel};
