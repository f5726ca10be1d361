//! # diffbot-rust
//!
//! Diffbot 内容抽取 API 的异步客户端，支持透明的请求批处理。
//!
//! Async client for the Diffbot extraction APIs (Article, Frontpage, Image, Product,
//! Page Classifier) with transparent request batching.
//!
//! ## Overview
//!
//! Every endpoint request can be sent two ways:
//!
//! - **Single call**: [`ApiRequest::execute`] issues one `GET` and decodes the body.
//! - **Batch**: [`ApiRequest::queue`] returns a [`PendingResult`] immediately. Nothing
//!   is sent until a pending result is awaited; the awaiting task then sends one
//!   combined call carrying up to `max_batch_requests` queued requests and resolves
//!   every one of them from the answer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use diffbot_rust::{DiffbotClient, PageType};
//!
//! #[tokio::main]
//! async fn main() -> diffbot_rust::Result<()> {
//!     let client = DiffbotClient::builder()
//!         .token("your-developer-token")
//!         .max_batch_requests(10)
//!         .build()?;
//!
//!     // Single call
//!     let article = client.article("http://example.com/post").execute().await?;
//!     println!("{:?}", article.title);
//!
//!     // Batched: both requests travel in one call
//!     let front = client.frontpage("http://example.com").queue();
//!     let kind = client.classifier("http://example.com/post").mode(PageType::Article).queue();
//!     let front = front.wait().await?;
//!     let kind = kind.wait().await?;
//!     println!("{} items, {:?}", front.items.len(), kind.page_type);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder and per-endpoint requests |
//! | [`batch`] | Pending queue, slicing, dispatch and response correlation |
//! | [`model`] | Response models and body decoding |
//! | [`protocol`] | Endpoints, request descriptors and relative URLs |
//! | [`transport`] | reqwest transport and the batch transport seam |
//! | [`error`] | Error type |

pub mod batch;
pub mod client;
pub mod model;
pub mod protocol;
pub mod transport;

// Re-export main types for convenience
pub use batch::PendingResult;
pub use client::{ApiRequest, DiffbotClient, DiffbotClientBuilder};
pub use model::{
    Article, Classified, Extracted, Frontpage, Images, Model, PageType, Products,
};
pub use protocol::{ApiKind, HttpMethod, RequestDescriptor};
pub use transport::BatchTransport;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
