//! 请求描述层：描述一次 Diffbot 调用（方法、相对 URL、结果类型）。
//!
//! # Request Description Layer
//!
//! Every call the client makes, single or batched, is first compiled into an
//! immutable [`RequestDescriptor`]. The descriptor's relative URL is computed once at
//! construction time and is the key used to correlate batch sub-responses back to
//! their pending results, so it never changes after the request is queued.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`endpoint`] | Diffbot API kinds, hosts and paths |
//! | [`request`] | Request descriptor and relative-URL encoding |

pub mod endpoint;
pub mod request;

pub use endpoint::{ApiKind, Endpoints};
pub use request::{HttpMethod, RequestDescriptor};
