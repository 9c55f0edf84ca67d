//! # taskdeck-board
//!
//! Kanban board state over a task collection, plus the reconciler that
//! turns a finished drag gesture into (at most) one status update.
//!
//! Column membership is never stored: a column is always the subset of
//! the collection whose `status` matches it, recomputed on demand. The
//! only board-owned state is the task collection itself and the single
//! active-drag record, which keeps the rendered position and the
//! authoritative status field from ever drifting apart.

#![deny(unsafe_code)]

use async_trait::async_trait;
use tracing::{debug, info};

use taskdeck_client::{ApiResult, TasksClient};
use taskdeck_core::{Task, TaskId, TaskStatus, TaskUpdateParams};

// ─────────────────────────────────────────────────────────────────────────────
// Update seam
// ─────────────────────────────────────────────────────────────────────────────

/// Sink for the single mutation a drop can produce. Implemented by
/// [`TasksClient`]; tests substitute recording fakes.
#[async_trait]
pub trait StatusUpdater: Send + Sync {
    /// Persist `status` for the task and return the server's view of it.
    async fn set_status(&self, id: &TaskId, status: TaskStatus) -> ApiResult<Task>;
}

#[async_trait]
impl StatusUpdater for TasksClient {
    async fn set_status(&self, id: &TaskId, status: TaskStatus) -> ApiResult<Task> {
        self.update(id, &TaskUpdateParams::status(status)).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Board state
// ─────────────────────────────────────────────────────────────────────────────

/// What a completed drop did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// One update was issued; the returned task (now in the collection)
    /// is the server's version.
    Moved(Task),
    /// The drop was a no-op: no target, unknown task, unresolvable
    /// column, or a drop within the task's current column. No request
    /// was made and the collection is unchanged.
    NoChange,
}

/// Board over a task collection with a single active drag gesture.
#[derive(Debug, Default)]
pub struct BoardState {
    tasks: Vec<Task>,
    active: Option<TaskId>,
    hovered: Option<TaskStatus>,
}

impl BoardState {
    /// Build a board over `tasks`.
    #[must_use]
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            active: None,
            hovered: None,
        }
    }

    /// The full task collection backing the board.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Replace the collection wholesale (after a list revalidation).
    /// An in-progress drag survives only if its task still exists.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        if let Some(active) = &self.active {
            if !self.tasks.iter().any(|t| t.id == *active) {
                self.active = None;
                self.hovered = None;
            }
        }
    }

    /// Tasks currently in the `status` column — always derived by
    /// filtering the collection, never stored.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Classify a drop/hover target id: a status wire string names that
    /// column, a known task id names the task's column, anything else is
    /// no column. Advisory for hover; authoritative for drops.
    #[must_use]
    pub fn classify(&self, target_id: &str) -> Option<TaskStatus> {
        if let Some(status) = TaskStatus::from_wire(target_id) {
            return Some(status);
        }
        self.tasks
            .iter()
            .find(|t| t.id.as_str() == target_id)
            .map(|t| t.status)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Drag lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Idle → Dragging: record the dragged task's id.
    pub fn drag_start(&mut self, id: TaskId) {
        debug!(%id, "drag started");
        self.active = Some(id);
        self.hovered = None;
    }

    /// The task being dragged, if a gesture is active.
    #[must_use]
    pub fn active(&self) -> Option<&TaskId> {
        self.active.as_ref()
    }

    /// Column currently highlighted as the hover target.
    #[must_use]
    pub fn hovered_column(&self) -> Option<TaskStatus> {
        self.hovered
    }

    /// Update the hover highlight from the current target. Purely
    /// advisory — unknown targets simply clear the highlight.
    pub fn drag_move(&mut self, target_id: Option<&str>) {
        self.hovered = target_id.and_then(|id| self.classify(id));
    }

    /// Dragging → Idle. Resolves the drop and persists a status change
    /// when one actually occurred:
    ///
    /// 1. No target, unknown active task, unresolvable target status, or
    ///    same-column drop → no request, no state change.
    /// 2. Otherwise exactly one update; on success the server's returned
    ///    task replaces the collection entry (the server's status is
    ///    trusted even if it differs from the requested one).
    ///
    /// The active id and hover highlight are cleared on every path,
    /// including failure. On failure the collection is untouched — the
    /// task keeps rendering in its original column because nothing was
    /// applied optimistically.
    pub async fn drag_end(
        &mut self,
        target_id: Option<&str>,
        updater: &dyn StatusUpdater,
    ) -> ApiResult<DropOutcome> {
        let active = self.active.take();
        self.hovered = None;

        let Some(target_id) = target_id else {
            debug!("drop without target");
            return Ok(DropOutcome::NoChange);
        };
        let Some(active_id) = active else {
            return Ok(DropOutcome::NoChange);
        };
        let Some(current_status) = self
            .tasks
            .iter()
            .find(|t| t.id == active_id)
            .map(|t| t.status)
        else {
            debug!(%active_id, "dragged task no longer in collection");
            return Ok(DropOutcome::NoChange);
        };
        let Some(new_status) = self.classify(target_id) else {
            debug!(target_id, "drop target resolves to no column");
            return Ok(DropOutcome::NoChange);
        };
        if new_status == current_status {
            debug!(%active_id, status = %new_status, "dropped in current column");
            return Ok(DropOutcome::NoChange);
        }

        let updated = updater.set_status(&active_id, new_status).await?;
        info!(%active_id, from = %current_status, to = %updated.status, "task moved");
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            *slot = updated.clone();
        }
        Ok(DropOutcome::Moved(updated))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use parking_lot::Mutex;

    use taskdeck_client::ApiError;

    use super::*;

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: TaskId::from(id),
            title: format!("task {id}"),
            description: None,
            status,
            created_at: "2026-06-01T00:00:00Z".parse().unwrap(),
            updated_at: "2026-06-01T00:00:00Z".parse().unwrap(),
        }
    }

    fn board() -> BoardState {
        BoardState::new(vec![
            task("a", TaskStatus::ToDo),
            task("b", TaskStatus::ToDo),
            task("c", TaskStatus::InProgress),
            task("d", TaskStatus::Done),
        ])
    }

    /// Records every update call; answers from a scripted queue, or, when
    /// the queue is empty, echoes the requested move.
    #[derive(Default)]
    struct RecordingUpdater {
        calls: Mutex<Vec<(TaskId, TaskStatus)>>,
        responses: Mutex<VecDeque<ApiResult<Task>>>,
    }

    impl RecordingUpdater {
        fn failing(status: u16) -> Self {
            let updater = Self::default();
            updater.responses.lock().push_back(Err(ApiError::Api {
                status,
                message: format!("Request failed with status {status}"),
            }));
            updater
        }

        fn calls(&self) -> Vec<(TaskId, TaskStatus)> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl StatusUpdater for RecordingUpdater {
        async fn set_status(&self, id: &TaskId, status: TaskStatus) -> ApiResult<Task> {
            self.calls.lock().push((id.clone(), status));
            if let Some(scripted) = self.responses.lock().pop_front() {
                return scripted;
            }
            let mut moved = task(id.as_str(), status);
            moved.updated_at = "2026-06-02T00:00:00Z".parse().unwrap();
            Ok(moved)
        }
    }

    // ── Derived columns ─────────────────────────────────────────────

    #[test]
    fn columns_equal_status_filter() {
        let board = board();
        for status in TaskStatus::ALL {
            let column = board.column(status);
            let expected: Vec<&Task> =
                board.tasks().iter().filter(|t| t.status == status).collect();
            assert_eq!(column, expected);
        }
    }

    #[test]
    fn every_task_is_in_exactly_one_column() {
        let board = board();
        let total: usize = TaskStatus::ALL.iter().map(|s| board.column(*s).len()).sum();
        assert_eq!(total, board.tasks().len());
    }

    // ── Classification ──────────────────────────────────────────────

    #[test]
    fn classify_column_id() {
        let board = board();
        assert_eq!(board.classify("DONE"), Some(TaskStatus::Done));
        assert_eq!(board.classify("TO_DO"), Some(TaskStatus::ToDo));
    }

    #[test]
    fn classify_task_id_maps_to_its_column() {
        let board = board();
        assert_eq!(board.classify("c"), Some(TaskStatus::InProgress));
        assert_eq!(board.classify("d"), Some(TaskStatus::Done));
    }

    #[test]
    fn classify_unknown_target_is_none() {
        let board = board();
        assert_eq!(board.classify("nope"), None);
        assert_eq!(board.classify(""), None);
        // Column ids are exact wire strings, nothing looser.
        assert_eq!(board.classify("done"), None);
    }

    // ── Hover ───────────────────────────────────────────────────────

    #[test]
    fn drag_move_highlights_and_clears() {
        let mut board = board();
        board.drag_start(TaskId::from("a"));

        board.drag_move(Some("IN_PROGRESS"));
        assert_eq!(board.hovered_column(), Some(TaskStatus::InProgress));

        board.drag_move(Some("d"));
        assert_eq!(board.hovered_column(), Some(TaskStatus::Done));

        board.drag_move(Some("unknown"));
        assert_eq!(board.hovered_column(), None);

        board.drag_move(None);
        assert_eq!(board.hovered_column(), None);
    }

    // ── Drops ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn drop_on_other_column_issues_one_update() {
        let mut board = board();
        let updater = RecordingUpdater::default();

        board.drag_start(TaskId::from("a"));
        let outcome = board.drag_end(Some("DONE"), &updater).await.unwrap();

        assert_eq!(updater.calls(), vec![(TaskId::from("a"), TaskStatus::Done)]);
        let DropOutcome::Moved(moved) = outcome else {
            panic!("expected a move");
        };
        assert_eq!(moved.status, TaskStatus::Done);
        assert_eq!(board.column(TaskStatus::Done).len(), 2);
        assert_eq!(board.column(TaskStatus::ToDo).len(), 1);
    }

    #[tokio::test]
    async fn drop_on_task_in_other_column_targets_that_column() {
        let mut board = board();
        let updater = RecordingUpdater::default();

        board.drag_start(TaskId::from("a"));
        let outcome = board.drag_end(Some("d"), &updater).await.unwrap();

        assert_eq!(updater.calls(), vec![(TaskId::from("a"), TaskStatus::Done)]);
        assert!(matches!(outcome, DropOutcome::Moved(_)));
    }

    #[tokio::test]
    async fn drop_in_own_column_is_a_no_op() {
        let mut board = board();
        let updater = RecordingUpdater::default();
        let before: Vec<Task> = board.tasks().to_vec();

        board.drag_start(TaskId::from("a"));
        // Both the column itself and a sibling task in it.
        let outcome = board.drag_end(Some("TO_DO"), &updater).await.unwrap();
        assert_eq!(outcome, DropOutcome::NoChange);

        board.drag_start(TaskId::from("a"));
        let outcome = board.drag_end(Some("b"), &updater).await.unwrap();
        assert_eq!(outcome, DropOutcome::NoChange);

        assert!(updater.calls().is_empty(), "no network call for same-column drops");
        assert_eq!(board.tasks(), &before[..]);
    }

    #[tokio::test]
    async fn drop_without_target_is_a_no_op() {
        let mut board = board();
        let updater = RecordingUpdater::default();

        board.drag_start(TaskId::from("a"));
        let outcome = board.drag_end(None, &updater).await.unwrap();

        assert_eq!(outcome, DropOutcome::NoChange);
        assert!(updater.calls().is_empty());
        assert!(board.active().is_none());
    }

    #[tokio::test]
    async fn drop_with_unknown_active_task_is_a_no_op() {
        let mut board = board();
        let updater = RecordingUpdater::default();

        board.drag_start(TaskId::from("ghost"));
        let outcome = board.drag_end(Some("DONE"), &updater).await.unwrap();

        assert_eq!(outcome, DropOutcome::NoChange);
        assert!(updater.calls().is_empty());
    }

    #[tokio::test]
    async fn drop_on_unresolvable_target_is_a_no_op() {
        let mut board = board();
        let updater = RecordingUpdater::default();

        board.drag_start(TaskId::from("a"));
        let outcome = board.drag_end(Some("garbage"), &updater).await.unwrap();

        assert_eq!(outcome, DropOutcome::NoChange);
        assert!(updater.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_update_leaves_collection_unchanged() {
        let mut board = board();
        let updater = RecordingUpdater::failing(500);
        let before: Vec<Task> = board.tasks().to_vec();

        board.drag_start(TaskId::from("a"));
        let err = board.drag_end(Some("DONE"), &updater).await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(board.tasks(), &before[..], "no optimistic mutation survives");
        assert_eq!(board.column(TaskStatus::ToDo).len(), 2);
        // Drag state is cleared even on failure.
        assert!(board.active().is_none());
        assert_eq!(board.hovered_column(), None);
    }

    #[tokio::test]
    async fn drag_state_resets_after_successful_drop() {
        let mut board = board();
        let updater = RecordingUpdater::default();

        board.drag_start(TaskId::from("a"));
        board.drag_move(Some("DONE"));
        let _ = board.drag_end(Some("DONE"), &updater).await.unwrap();

        assert!(board.active().is_none());
        assert_eq!(board.hovered_column(), None);
    }

    #[tokio::test]
    async fn server_status_is_trusted_over_requested() {
        let mut board = board();
        // Server-side workflow rules send the task somewhere else.
        let updater = RecordingUpdater::default();
        updater
            .responses
            .lock()
            .push_back(Ok(task("a", TaskStatus::InProgress)));

        board.drag_start(TaskId::from("a"));
        let outcome = board.drag_end(Some("DONE"), &updater).await.unwrap();

        let DropOutcome::Moved(moved) = outcome else {
            panic!("expected a move");
        };
        assert_eq!(moved.status, TaskStatus::InProgress);
        assert!(board.column(TaskStatus::InProgress).iter().any(|t| t.id.as_str() == "a"));
    }

    // ── Collection replacement ──────────────────────────────────────

    #[test]
    fn set_tasks_cancels_drag_of_removed_task() {
        let mut board = board();
        board.drag_start(TaskId::from("a"));
        board.set_tasks(vec![task("z", TaskStatus::Done)]);
        assert!(board.active().is_none());
    }

    #[test]
    fn set_tasks_keeps_drag_of_surviving_task() {
        let mut board = board();
        board.drag_start(TaskId::from("a"));
        board.set_tasks(vec![task("a", TaskStatus::ToDo)]);
        assert_eq!(board.active().map(TaskId::as_str), Some("a"));
    }
}
