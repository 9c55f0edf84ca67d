//! Error taxonomy for API operations.

use serde::Deserialize;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by [`TasksClient`](crate::TasksClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The API base URL is not configured. Fatal — there is nothing to
    /// retry until configuration changes.
    #[error("API URL not configured")]
    Config,

    /// The server answered with a non-success status. `message` comes
    /// from the response body when it carries one, otherwise it is
    /// synthesized from the status code.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided or synthesized description.
        message: String,
    },

    /// A success response carried a body we could not decode.
    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    /// The request failed before any HTTP status was produced
    /// (connection refused, DNS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// The HTTP status behind this error, when one exists.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Config | Self::Json(_) => None,
        }
    }

    /// Whether this is a not-found response. There is no distinct
    /// not-found variant — the status code is preserved instead.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Body shape servers commonly use for structured errors. Both fields
/// are optional; `error` wins when both are present.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Build the [`ApiError::Api`] for a non-success response body.
///
/// Extracts `message`/`error` from a JSON body when present; any other
/// body (including non-JSON) falls back to a synthesized message.
#[must_use]
pub(crate) fn api_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or_else(|| format!("Request failed with status {status}"));
    ApiError::Api { status, message }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_field() {
        let err = api_error(400, r#"{"message":"title must not be empty"}"#);
        assert_eq!(err.to_string(), "title must not be empty");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn extracts_error_field() {
        let err = api_error(404, r#"{"error":"Task not found"}"#);
        assert_eq!(err.to_string(), "Task not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn error_field_wins_over_message() {
        let err = api_error(500, r#"{"message":"a","error":"b"}"#);
        assert_eq!(err.to_string(), "b");
    }

    #[test]
    fn synthesizes_for_non_json_body() {
        let err = api_error(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn synthesizes_for_json_without_known_fields() {
        let err = api_error(500, r#"{"detail":"boom"}"#);
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn synthesizes_for_empty_body() {
        let err = api_error(503, "");
        assert_eq!(err.to_string(), "Request failed with status 503");
    }

    #[test]
    fn config_error_has_no_status() {
        assert_eq!(ApiError::Config.status(), None);
        assert_eq!(ApiError::Config.to_string(), "API URL not configured");
    }
}
