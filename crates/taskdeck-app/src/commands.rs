//! Subcommand implementations: wire the client, cache and board together
//! and print what came back.

use std::io::Write;

use anyhow::Result;
use tracing::debug;

use taskdeck_board::{BoardState, DropOutcome};
use taskdeck_cache::ListQueryCache;
use taskdeck_client::TasksClient;
use taskdeck_core::{CreateForm, EditForm, ListQuery, TaskId, TaskStatus};
use taskdeck_settings::Settings;

use crate::render;

fn base_query(settings: &Settings, limit: Option<u32>) -> ListQuery {
    ListQuery {
        limit: limit.unwrap_or(settings.ui.page_size),
        ..ListQuery::default()
    }
}

/// `taskdeck list` — one page of tasks as a table.
pub async fn list(
    client: &TasksClient,
    settings: &Settings,
    page: u32,
    limit: Option<u32>,
    status: Option<TaskStatus>,
) -> Result<()> {
    let query = base_query(settings, limit).with_status(status).at_page(page);
    let cache = ListQueryCache::new(query);
    let snapshot = cache.ensure(client).await;

    if let Some(err) = snapshot.error {
        anyhow::bail!("{err}");
    }
    let Some(page) = snapshot.page else {
        anyhow::bail!("no data returned for the requested page");
    };
    println!("{}", render::table(&page));
    Ok(())
}

/// `taskdeck board` — tasks of the current page grouped into columns.
pub async fn board(client: &TasksClient, settings: &Settings, limit: Option<u32>) -> Result<()> {
    let cache = ListQueryCache::new(base_query(settings, limit));
    let snapshot = cache.ensure(client).await;

    if let Some(err) = snapshot.error {
        anyhow::bail!("{err}");
    }
    let Some(page) = snapshot.page else {
        anyhow::bail!("no data returned for the board");
    };
    let board = BoardState::new(page.data);
    println!("{}", render::board(&board));
    Ok(())
}

/// `taskdeck show <id>`.
pub async fn show(client: &TasksClient, id: &str) -> Result<()> {
    let task = client.get(&TaskId::from(id)).await?;
    println!("{}", render::detail(&task));
    Ok(())
}

/// `taskdeck create` — validate locally, then POST.
pub async fn create(client: &TasksClient, title: &str, description: &str) -> Result<()> {
    // Validation failure never reaches the network.
    let params = CreateForm::new(title, description).params()?;
    let task = client.create(&params).await?;
    println!("Created {}", render::summary(&task));
    Ok(())
}

/// `taskdeck edit <id>` — load, diff against the form, PATCH only the
/// changed fields. An unchanged form sends nothing.
pub async fn edit(
    client: &TasksClient,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
) -> Result<()> {
    let id = TaskId::from(id);
    let task = client.get(&id).await?;

    let mut form = EditForm::new(task);
    if let Some(title) = title {
        form.title = title;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if let Some(status) = status {
        form.status = status;
    }

    let params = form.params()?;
    if params.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }
    let task = client.update(&id, &params).await?;
    println!("Updated {}", render::summary(&task));
    Ok(())
}

/// `taskdeck move <id> <status>` — run the drop algorithm against the
/// task's current state; moving to the current column is a no-op.
pub async fn move_task(client: &TasksClient, id: &str, status: TaskStatus) -> Result<()> {
    let id = TaskId::from(id);
    let task = client.get(&id).await?;

    let mut board = BoardState::new(vec![task]);
    board.drag_start(id);
    match board.drag_end(Some(status.as_wire()), client).await? {
        DropOutcome::Moved(task) => println!("Moved {}", render::summary(&task)),
        DropOutcome::NoChange => println!("Already in {} — nothing to do.", status.label()),
    }
    Ok(())
}

/// `taskdeck delete <id>` — confirm, DELETE, then revalidate the list so
/// the next view reflects the removal.
pub async fn delete(client: &TasksClient, settings: &Settings, id: &str, yes: bool) -> Result<()> {
    if !yes {
        print!("Delete task {id}? This action cannot be undone. [y/N] ");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        let _ = std::io::stdin().read_line(&mut answer)?;
        if !confirmed(&answer) {
            println!("Aborted.");
            return Ok(());
        }
    }

    client.delete(&TaskId::from(id)).await?;
    println!("Task deleted.");
    debug!(%id, "revalidating list after delete");

    let cache = ListQueryCache::new(base_query(settings, None));
    let snapshot = cache.mutate(client).await;
    if let Some(page) = snapshot.page {
        println!("{}", render::table(&page));
    }
    Ok(())
}

/// Interpret a confirmation prompt answer.
fn confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_accepts_yes_variants() {
        assert!(confirmed("y\n"));
        assert!(confirmed("Y"));
        assert!(confirmed("yes"));
        assert!(confirmed(" YES \n"));
    }

    #[test]
    fn confirmation_defaults_to_no() {
        assert!(!confirmed(""));
        assert!(!confirmed("\n"));
        assert!(!confirmed("n"));
        assert!(!confirmed("nope"));
        assert!(!confirmed("yep"));
    }

    #[test]
    fn base_query_prefers_explicit_limit() {
        let settings = Settings::default();
        assert_eq!(base_query(&settings, None).limit, 10);
        assert_eq!(base_query(&settings, Some(25)).limit, 25);
        assert_eq!(base_query(&settings, None).page, 1);
    }
}
