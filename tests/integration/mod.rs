//! Integration tests with mock HTTP server

pub mod batch;
pub mod error_handling;
pub mod properties;
pub mod scripted;
pub mod single_call;
