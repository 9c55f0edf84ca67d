//! Plain-text rendering of tasks, pages and the board.
//!
//! Everything returns a `String` so commands stay printable and tests
//! stay simple.

use taskdeck_board::BoardState;
use taskdeck_core::{Task, TaskPage, TaskStatus};

const COLUMN_WIDTH: usize = 26;

/// One-line task reference used in mutation confirmations.
pub fn summary(task: &Task) -> String {
    format!("[{}] {} ({})", task.id, task.title, task.status)
}

/// Full task detail for `show`.
pub fn detail(task: &Task) -> String {
    let mut out = String::new();
    out.push_str(&format!("Id:          {}\n", task.id));
    out.push_str(&format!("Title:       {}\n", task.title));
    out.push_str(&format!("Status:      {}\n", task.status));
    out.push_str(&format!(
        "Description: {}\n",
        task.description.as_deref().unwrap_or("—")
    ));
    out.push_str(&format!("Created:     {}\n", timestamp(task, true)));
    out.push_str(&format!("Updated:     {}", timestamp(task, false)));
    out
}

/// Paginated table for `list`.
pub fn table(page: &TaskPage) -> String {
    if page.data.is_empty() {
        return "No tasks found.".to_owned();
    }

    let id_width = page
        .data
        .iter()
        .map(|t| t.id.as_str().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let mut out = String::new();
    out.push_str(&format!("{:id_width$}  {:11}  TITLE\n", "ID", "STATUS"));
    for task in &page.data {
        out.push_str(&format!(
            "{:id_width$}  {:11}  {}\n",
            task.id.as_str(),
            task.status.as_wire(),
            task.title
        ));
    }
    out.push_str(&footer(page));
    out
}

/// Kanban board for `board`: three fixed-width columns, membership
/// derived from each task's status.
pub fn board(board: &BoardState) -> String {
    if board.tasks().is_empty() {
        return "No tasks found.".to_owned();
    }

    let columns: Vec<Vec<String>> = TaskStatus::ALL
        .iter()
        .map(|status| {
            let tasks = board.column(*status);
            let mut lines = vec![format!("{} ({})", status.label(), tasks.len())];
            lines.extend(
                tasks
                    .iter()
                    .map(|t| truncate(&format!("[{}] {}", t.id, t.title), COLUMN_WIDTH - 2)),
            );
            lines
        })
        .collect();

    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    let width = COLUMN_WIDTH;
    let mut out = String::new();
    for row in 0..rows {
        let line = columns
            .iter()
            .map(|col| format!("{:width$}", col.get(row).map_or("", String::as_str)))
            .collect::<String>();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    let _ = out.pop();
    out
}

fn footer(page: &TaskPage) -> String {
    let tasks = if page.total == 1 { "task" } else { "tasks" };
    if page.total_pages > 1 {
        format!("Page {} of {} ({} {tasks})", page.page, page.total_pages, page.total)
    } else {
        format!("{} {tasks}", page.total)
    }
}

fn timestamp(task: &Task, created: bool) -> String {
    let ts = if created { task.created_at } else { task.updated_at };
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_owned()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
