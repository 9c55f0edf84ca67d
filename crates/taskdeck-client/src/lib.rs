//! # taskdeck-client
//!
//! Typed HTTP client for the tasks REST API. One method per endpoint,
//! one error type for the whole surface. No caching and no retry live
//! here — caching is `taskdeck-cache`'s job, and every error is
//! surfaced to the caller exactly once.

#![deny(unsafe_code)]

pub mod client;
pub mod error;

pub use client::TasksClient;
pub use error::{ApiError, ApiResult};
