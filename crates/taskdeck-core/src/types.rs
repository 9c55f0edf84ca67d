//! Wire types for the tasks REST API.
//!
//! Field names follow the server's camelCase JSON. [`TaskStatus`] is a
//! closed enumeration — the three wire strings `TO_DO`, `IN_PROGRESS`
//! and `DONE` are the only valid values in either direction.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::TaskId;

// ─────────────────────────────────────────────────────────────────────────────
// TaskStatus
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle status of a task. Drives both list filtering and kanban
/// column placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started.
    ToDo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    /// The exact wire string for this status.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::ToDo => "TO_DO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }

    /// Parse an exact wire string. Used by the board to recognize column
    /// drop targets, so no case folding or aliasing happens here.
    #[must_use]
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "TO_DO" => Some(Self::ToDo),
            "IN_PROGRESS" => Some(Self::InProgress),
            "DONE" => Some(Self::Done),
            _ => None,
        }
    }

    /// Human-readable column header.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Error returned when a string is not a recognized status.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status: {0} (expected TO_DO, IN_PROGRESS or DONE)")]
pub struct ParseStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    /// Lenient parse for user input: case-insensitive, accepts `-` for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        Self::from_wire(&normalized).ok_or_else(|| ParseStatusError(s.to_owned()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Task and pages
// ─────────────────────────────────────────────────────────────────────────────

/// A persisted task as returned by the server.
///
/// `title` is non-empty after any validated create/edit. Timestamps are
/// server-assigned: `created_at` is immutable, `updated_at` monotonic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Required, non-empty.
    pub title: String,
    /// Optional free text; `null` on the wire when cleared.
    pub description: Option<String>,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// One page of the task list, with pagination metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    /// Tasks on this page, in server-defined order.
    pub data: Vec<Task>,
    /// Total matching tasks across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// `max(1, ceil(total / limit))`, computed server-side.
    pub total_pages: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Queries and mutation params
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters of a list request. The exact tuple is the cache key — two
/// queries are the same cache slot iff all three fields are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListQuery {
    /// 1-based page to fetch.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Optional status filter; `None` lists every status.
    pub status: Option<TaskStatus>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: None,
        }
    }
}

impl ListQuery {
    /// Same query repositioned at `page`.
    #[must_use]
    pub fn at_page(self, page: u32) -> Self {
        Self { page, ..self }
    }

    /// Same query with a different status filter (page reset to 1, since
    /// the old position is meaningless under a new filter).
    #[must_use]
    pub fn with_status(self, status: Option<TaskStatus>) -> Self {
        Self {
            page: 1,
            status,
            ..self
        }
    }
}

/// Payload for creating a task.
///
/// `title` must already be validated non-empty (see
/// [`CreateForm`](crate::form::CreateForm)). Omitted `status` defaults to
/// `TO_DO` server-side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskCreateParams {
    /// Required task title, pre-trimmed.
    pub title: String,
    /// Optional description; not serialized when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional initial status; not serialized when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

/// Partial-update payload. Only present fields change server-side.
///
/// `description` is double-optional: outer `None` omits the field
/// entirely (unchanged), `Some(None)` serializes an explicit `null`
/// (clears it), `Some(Some(s))` sets a new value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskUpdateParams {
    /// New title, pre-trimmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, or explicit clear.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskUpdateParams {
    /// A patch that only moves the task to `status`.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Whether this patch changes nothing. Callers skip the request for
    /// an empty patch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
