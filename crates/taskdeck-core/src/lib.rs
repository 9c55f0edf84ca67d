//! # taskdeck-core
//!
//! Domain model shared by every taskdeck crate: the [`Task`] entity and
//! its wire representation, list-query/pagination math, and the
//! client-side form rules for building create/update payloads.
//!
//! Nothing in this crate performs I/O — the HTTP layer lives in
//! `taskdeck-client`, caching in `taskdeck-cache`.

#![deny(unsafe_code)]

pub mod form;
pub mod ids;
pub mod page;
pub mod types;

pub use form::{CreateForm, EditForm, FormError};
pub use ids::TaskId;
pub use page::page_count;
pub use types::{ListQuery, Task, TaskCreateParams, TaskPage, TaskStatus, TaskUpdateParams};
