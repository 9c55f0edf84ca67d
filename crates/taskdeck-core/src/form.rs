//! Client-side form rules for creating and editing tasks.
//!
//! The only required-field rule in the system: a title must be non-empty
//! after trimming. Edit payloads are diffs — only fields that differ
//! from the task's last-loaded values are sent, and an emptied
//! description becomes an explicit clear (`null` on the wire).

use crate::types::{Task, TaskCreateParams, TaskStatus, TaskUpdateParams};

/// Validation failure for a task form.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Title empty or whitespace-only. Submission must not reach the
    /// network in this state.
    #[error("Title is required.")]
    TitleRequired,
}

// ─────────────────────────────────────────────────────────────────────────────
// CreateForm
// ─────────────────────────────────────────────────────────────────────────────

/// Field state of the create-task form.
#[derive(Clone, Debug, Default)]
pub struct CreateForm {
    /// Raw title input.
    pub title: String,
    /// Raw description input.
    pub description: String,
}

impl CreateForm {
    /// Build a form from raw input values.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Whether the form passes validation as-is.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Validate and build the creation payload: trimmed title, and the
    /// description only when non-empty after trim. Status is left to the
    /// server default (`TO_DO`).
    pub fn params(&self) -> Result<TaskCreateParams, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::TitleRequired);
        }
        let description = self.description.trim();
        Ok(TaskCreateParams {
            title: title.to_owned(),
            description: (!description.is_empty()).then(|| description.to_owned()),
            status: None,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EditForm
// ─────────────────────────────────────────────────────────────────────────────

/// Field state of the edit-task form, seeded from the loaded task so the
/// payload can be computed as a diff.
#[derive(Clone, Debug)]
pub struct EditForm {
    initial: Task,
    /// Current title input.
    pub title: String,
    /// Current description input (empty string when the task has none).
    pub description: String,
    /// Currently selected status.
    pub status: TaskStatus,
}

impl EditForm {
    /// Seed the form from the task's last-loaded values.
    #[must_use]
    pub fn new(task: Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status,
            initial: task,
        }
    }

    /// The task this form was seeded from.
    #[must_use]
    pub fn initial(&self) -> &Task {
        &self.initial
    }

    /// Whether the form passes validation as-is.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Validate and build the update payload, containing only fields that
    /// differ from the initial values:
    ///
    /// - title if changed (sent trimmed)
    /// - description if changed (empty string → explicit clear)
    /// - status if changed
    ///
    /// An unchanged form yields an empty patch; callers skip the request.
    pub fn params(&self) -> Result<TaskUpdateParams, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::TitleRequired);
        }

        let mut params = TaskUpdateParams::default();
        if self.initial.title != self.title {
            params.title = Some(self.title.trim().to_owned());
        }
        let initial_description = self.initial.description.as_deref().unwrap_or_default();
        if initial_description != self.description {
            params.description = Some(if self.description.is_empty() {
                None
            } else {
                Some(self.description.clone())
            });
        }
        if self.initial.status != self.status {
            params.status = Some(self.status);
        }
        Ok(params)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TaskId;

    fn loaded_task() -> Task {
        Task {
            id: TaskId::from("t1"),
            title: "Ship release".into(),
            description: Some("cut the branch".into()),
            status: TaskStatus::ToDo,
            created_at: "2026-03-01T08:00:00Z".parse().unwrap(),
            updated_at: "2026-03-01T08:00:00Z".parse().unwrap(),
        }
    }

    // ── CreateForm ──────────────────────────────────────────────────

    #[test]
    fn create_rejects_empty_title() {
        assert_eq!(CreateForm::new("", "x").params(), Err(FormError::TitleRequired));
    }

    #[test]
    fn create_rejects_whitespace_title() {
        let form = CreateForm::new("   \t", "x");
        assert!(!form.is_valid());
        assert_eq!(form.params(), Err(FormError::TitleRequired));
    }

    #[test]
    fn create_trims_title_and_description() {
        let params = CreateForm::new("  Fix login  ", "  retry on 401  ").params().unwrap();
        assert_eq!(params.title, "Fix login");
        assert_eq!(params.description.as_deref(), Some("retry on 401"));
        assert!(params.status.is_none());
    }

    #[test]
    fn create_omits_blank_description() {
        let params = CreateForm::new("Fix login", "   ").params().unwrap();
        assert!(params.description.is_none());
    }

    // ── EditForm ────────────────────────────────────────────────────

    #[test]
    fn edit_unchanged_form_builds_empty_patch() {
        let form = EditForm::new(loaded_task());
        assert!(form.params().unwrap().is_empty());
    }

    #[test]
    fn edit_title_only() {
        let mut form = EditForm::new(loaded_task());
        form.title = "Ship release v2 ".into();
        let params = form.params().unwrap();
        assert_eq!(params.title.as_deref(), Some("Ship release v2"));
        assert!(params.description.is_none());
        assert!(params.status.is_none());
    }

    #[test]
    fn edit_description_only_sends_exactly_description() {
        let mut form = EditForm::new(loaded_task());
        form.description = "cut the branch, tag it".into();
        let params = form.params().unwrap();
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"description": "cut the branch, tag it"})
        );
    }

    #[test]
    fn edit_emptied_description_is_explicit_clear() {
        let mut form = EditForm::new(loaded_task());
        form.description = String::new();
        let params = form.params().unwrap();
        assert_eq!(params.description, Some(None));
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"description": null})
        );
    }

    #[test]
    fn edit_status_change_only() {
        let mut form = EditForm::new(loaded_task());
        form.status = TaskStatus::Done;
        let params = form.params().unwrap();
        assert_eq!(params.status, Some(TaskStatus::Done));
        assert!(params.title.is_none());
        assert!(params.description.is_none());
    }

    #[test]
    fn edit_task_without_description_seeds_empty_string() {
        let mut task = loaded_task();
        task.description = None;
        let form = EditForm::new(task);
        assert_eq!(form.description, "");
        // Leaving it empty is not a change.
        assert!(form.params().unwrap().description.is_none());
    }

    #[test]
    fn edit_blank_title_blocks_submission() {
        let mut form = EditForm::new(loaded_task());
        form.title = "  ".into();
        assert_eq!(form.params(), Err(FormError::TitleRequired));
    }
}
