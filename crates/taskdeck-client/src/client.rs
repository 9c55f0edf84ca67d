//! The tasks REST client.
//!
//! Endpoint map:
//!
//! | Operation | Method | Path          |
//! |-----------|--------|---------------|
//! | list      | GET    | `/tasks`      |
//! | get       | GET    | `/tasks/{id}` |
//! | create    | POST   | `/tasks`      |
//! | update    | PATCH  | `/tasks/{id}` |
//! | delete    | DELETE | `/tasks/{id}` |

use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use taskdeck_core::{ListQuery, Task, TaskCreateParams, TaskId, TaskPage, TaskUpdateParams};

use crate::error::{api_error, ApiError, ApiResult};

/// Typed client for the tasks API. Holds a single [`reqwest::Client`]
/// reused across requests; cloning is cheap and shares the connection
/// pool.
#[derive(Clone, Debug)]
pub struct TasksClient {
    base_url: String,
    client: reqwest::Client,
}

impl TasksClient {
    /// Build a client for `base_url`.
    ///
    /// `None` or an empty string is a configuration error — the caller
    /// surfaces it immediately rather than failing on first use.
    pub fn new(base_url: Option<&str>) -> ApiResult<Self> {
        let base_url = base_url
            .map(|u| u.trim_end_matches('/').to_owned())
            .filter(|u| !u.is_empty())
            .ok_or(ApiError::Config)?;
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    /// The configured base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Fetch one page of tasks, optionally filtered by status.
    pub async fn list(&self, query: &ListQuery) -> ApiResult<TaskPage> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(status) = query.status {
            params.push(("status", status.as_wire().to_owned()));
        }

        debug!(page = query.page, limit = query.limit, status = ?query.status, "listing tasks");
        let response = self
            .client
            .get(format!("{}/tasks", self.base_url))
            .query(&params)
            .send()
            .await?;
        read_json(response).await
    }

    /// Fetch a single task by ID. A missing task surfaces as an ordinary
    /// [`ApiError::Api`] carrying the server's 404.
    pub async fn get(&self, id: &TaskId) -> ApiResult<Task> {
        debug!(%id, "fetching task");
        let response = self
            .client
            .get(format!("{}/tasks/{id}", self.base_url))
            .send()
            .await?;
        read_json(response).await
    }

    /// Create a task. The caller validates the title before invoking.
    pub async fn create(&self, params: &TaskCreateParams) -> ApiResult<Task> {
        debug!(title = %params.title, "creating task");
        let response = self
            .client
            .post(format!("{}/tasks", self.base_url))
            .json(params)
            .send()
            .await?;
        read_json(response).await
    }

    /// Partially update a task. Only fields present in `params` change;
    /// see [`TaskUpdateParams`] for the description clear semantics.
    pub async fn update(&self, id: &TaskId, params: &TaskUpdateParams) -> ApiResult<Task> {
        debug!(%id, "updating task");
        let response = self
            .client
            .patch(format!("{}/tasks/{id}", self.base_url))
            .json(params)
            .send()
            .await?;
        read_json(response).await
    }

    /// Delete a task. Success responses carry no body (200 or 204).
    pub async fn delete(&self, id: &TaskId) -> ApiResult<()> {
        debug!(%id, "deleting task");
        let response = self
            .client
            .delete(format!("{}/tasks/{id}", self.base_url))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            let err = api_error(status.as_u16(), &body);
            warn!(status = status.as_u16(), "delete failed");
            Err(err)
        }
    }
}

/// Check the status and decode a JSON success body.
async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let err = api_error(status.as_u16(), &body);
        warn!(status = status.as_u16(), message = %err, "request failed");
        return Err(err);
    }
    // Decode via text so a malformed body maps to ApiError::Json rather
    // than a transport error.
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
