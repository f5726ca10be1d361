//! 批处理模块：排队、切分、合并发送与响应关联。
//!
//! # Request Batching
//!
//! Requests queued on a client are not sent when they are created. They wait in a
//! [`PendingQueue`] until some caller awaits one of them; that caller's task then
//! performs the combined call for everything that fits in the batch ("sender pays").
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`PendingResult`] | Typed handle to a queued request; [`PendingResult::wait`] may dispatch |
//! | [`PendingQueue`] | FIFO of unresolved requests, one mutex, never held across I/O |
//! | [`slice`] / [`SlicePolicy`] | Which queued requests go into the next batch call(s) |
//! | [`BatchDispatcher`] | One combined call per batch, with timeout, sync or spawned |
//! | [`correlate`] | Matches sub-responses to requests by relative URL |
//! | [`BatchCoordinator`] | Ties the above together and requeues on failure |
//!
//! ## Failure model
//!
//! A batch is all-or-nothing with respect to the queue. If the combined call fails,
//! every member goes back to the front of the queue unresolved and the triggering
//! caller receives [`Error::Batch`](crate::Error::Batch). If it succeeds, each member
//! is resolved on its own and may carry its own error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use diffbot_rust::DiffbotClient;
//!
//! # async fn run() -> diffbot_rust::Result<()> {
//! let client = DiffbotClient::builder().token("your-token").build()?;
//! let first = client.article("http://example.com/a").queue();
//! let second = client.article("http://example.com/b").queue();
//!
//! // One batch call resolves both.
//! let a = first.wait().await?;
//! let b = second.wait().await?;
//! # let _ = (a, b);
//! # Ok(())
//! # }
//! ```

mod coordinator;
mod correlator;
mod dispatcher;
mod pending;
mod queue;
mod slicer;

pub use coordinator::{BatchCoordinator, Trigger};
pub use correlator::{correlate, sub_response_outcome, Correlation};
pub use dispatcher::{BatchDispatcher, BatchHandle, DEFAULT_BATCH_TIMEOUT};
pub use pending::{PendingResult, PendingSlot, SlotState};
pub use queue::PendingQueue;
pub use slicer::{slice, SlicePolicy};
