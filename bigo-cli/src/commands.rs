//! Command implementations
//!
//! Every command is one board transaction: take the store lock, load the
//! snapshot, apply a single change through the [`BoardStore`], save, and
//! record the change in the activity journal. Read-only commands skip the
//! lock and journal.
//!
//! A missing board directory is not an error for reads: the board opens
//! seeded, exactly like a first visit, and materializes on disk with the
//! first change.

use std::path::Path;

use bigo_board::{
    autosave, defaults, filter, Actor, BoardError, BoardState, BoardStore, ColumnId, FilterChoice,
    Result, Task, TaskChanges, TaskDraft, TaskFilters, TaskId,
};
use bigo_store::{FileStore, JournalEntry, SnapshotStore, StoreLock};
use serde_json::json;
use tracing::warn;

/// Lock the board directory and load its state for a mutation
async fn open_board(dir: &Path, actor: &Actor) -> Result<(FileStore, StoreLock, BoardStore)> {
    let store = FileStore::new(dir);
    store.ensure_root().await?;
    let lock = store.lock().await?;
    let state = autosave::load_board(&store).await;
    let board = BoardStore::new(state, actor.clone());
    Ok((store, lock, board))
}

/// Append to the activity journal; failures are logged, never fatal
async fn record(store: &FileStore, op: &str, details: serde_json::Value, actor: &Actor) {
    let mut entry = JournalEntry::new(op, details);
    if !actor.is_unassigned() {
        entry = entry.with_actor(actor.name.clone());
    }
    if let Err(error) = store.journal().append(&entry).await {
        warn!(%error, "failed to record activity in journal");
    }
}

/// Resolve a column argument by id, then by exact title
fn resolve_column(state: &BoardState, key: &str) -> Result<ColumnId> {
    let id = ColumnId::from_string(key);
    if state.column(&id).is_some() {
        return Ok(id);
    }
    state
        .columns
        .iter()
        .find(|c| c.title == key)
        .map(|c| c.id.clone())
        .ok_or_else(|| BoardError::column_not_found(key))
}

/// Resolve a task argument by id, then by exact title
fn resolve_task(state: &BoardState, key: &str) -> Result<TaskId> {
    let id = TaskId::from_string(key);
    if state.task(&id).is_some() {
        return Ok(id);
    }
    state
        .tasks
        .iter()
        .find(|t| t.title == key)
        .map(|t| t.id.clone())
        .ok_or_else(|| BoardError::task_not_found(key))
}

pub async fn run_init(dir: &Path, actor: &Actor) -> Result<()> {
    let store = FileStore::new(dir);
    if store.is_initialized() {
        return Err(BoardError::invalid_value(
            "board",
            format!("already initialized at {}", dir.display()),
        ));
    }
    store.ensure_root().await?;
    let _lock = store.lock().await?;

    let state = BoardState::seeded();
    store.save(&state).await?;
    record(&store, "init", json!({ "columns": state.columns.len() }), actor).await;

    println!("Initialized board at {}", dir.display());
    let lanes: Vec<&str> = state.columns.iter().map(|c| c.title.as_str()).collect();
    println!("Lanes: {}", lanes.join(", "));
    Ok(())
}

pub async fn run_board(dir: &Path, label: &str, assignee: &str) -> Result<()> {
    let store = FileStore::new(dir);
    let state = autosave::load_board(&store).await;

    let filters = TaskFilters {
        label: FilterChoice::parse(label),
        assignee: FilterChoice::parse(assignee),
    };
    let visible = filter::filter_tasks(&state.tasks, &filters);

    if !filters.label.is_all() || !filters.assignee.is_all() {
        println!("Filters: label={label} assignee={assignee}");
        println!();
    }

    for column in &state.columns {
        let lane = filter::column_tasks(&visible, &column.id);
        println!("{} [{}] ({})", column.title, column.id, lane.len());
        if lane.is_empty() {
            println!("  (empty)");
        }
        for task in lane {
            print_task(task);
        }
        println!();
    }
    Ok(())
}

fn print_task(task: &Task) {
    let mut line = format!("  [{}] {}  @{}", task.id, task.title, task.assignee);
    for label in &task.labels {
        line.push_str(&format!("  #{label}"));
    }
    println!("{line}");
    if !task.description.is_empty() {
        println!("      {}", task.description);
    }
}

pub async fn run_add_task(
    dir: &Path,
    actor: &Actor,
    title: String,
    description: String,
    labels: Vec<String>,
    column: Option<String>,
) -> Result<()> {
    let (store, _lock, board) = open_board(dir, actor).await?;

    let mut draft = TaskDraft::new(title)
        .with_description(description)
        .with_labels(labels);
    if let Some(key) = column {
        draft = draft.with_status(resolve_column(&board.state(), &key)?);
    }

    let next = board.add_task(draft)?;
    store.save(&next).await?;

    if let Some(task) = next.tasks.last() {
        let details = json!({
            "task": task.id.as_str(),
            "title": task.title,
            "status": task.status.as_str(),
        });
        record(&store, "add task", details, actor).await;
        println!("Added task '{}' [{}]", task.title, task.id);
    }
    Ok(())
}

pub async fn run_add_column(dir: &Path, actor: &Actor, title: String) -> Result<()> {
    let (store, _lock, board) = open_board(dir, actor).await?;

    let next = board.add_column(title)?;
    store.save(&next).await?;

    if let Some(column) = next.columns.last() {
        record(
            &store,
            "add column",
            json!({ "column": column.id.as_str(), "title": column.title }),
            actor,
        )
        .await;
        println!("Added column '{}' [{}]", column.title, column.id);
    }
    Ok(())
}

pub async fn run_move_task(dir: &Path, actor: &Actor, task: String, column: String) -> Result<()> {
    let (store, _lock, board) = open_board(dir, actor).await?;
    let state = board.state();
    let task_id = resolve_task(&state, &task)?;
    let column_id = resolve_column(&state, &column)?;

    let next = board.update_task_status(&task_id, column_id.clone());
    store.save(&next).await?;
    record(
        &store,
        "move task",
        json!({ "task": task_id.as_str(), "status": column_id.as_str() }),
        actor,
    )
    .await;

    if let Some(column) = next.column(&column_id) {
        println!("Moved task to '{}'", column.title);
    }
    Ok(())
}

pub async fn run_move_column(dir: &Path, actor: &Actor, from: usize, to: usize) -> Result<()> {
    let (store, _lock, board) = open_board(dir, actor).await?;

    // The store shrugs off out-of-range positions; a typed-in one deserves
    // an error instead
    let len = board.state().columns.len();
    if len == 0 {
        return Err(BoardError::invalid_value("position", "board has no columns"));
    }
    if from >= len || to >= len {
        return Err(BoardError::invalid_value(
            "position",
            format!("column positions are 0..={}", len - 1),
        ));
    }

    let next = board.move_column(from, to);
    store.save(&next).await?;
    record(&store, "move column", json!({ "from": from, "to": to }), actor).await;

    let lanes: Vec<&str> = next.columns.iter().map(|c| c.title.as_str()).collect();
    println!("Lanes: {}", lanes.join(", "));
    Ok(())
}

pub async fn run_rename_column(
    dir: &Path,
    actor: &Actor,
    column: String,
    title: String,
) -> Result<()> {
    let (store, _lock, board) = open_board(dir, actor).await?;
    let column_id = resolve_column(&board.state(), &column)?;

    let next = board.rename_column(&column_id, title)?;
    store.save(&next).await?;

    if let Some(column) = next.column(&column_id) {
        record(
            &store,
            "rename column",
            json!({ "column": column_id.as_str(), "title": column.title }),
            actor,
        )
        .await;
        println!("Renamed column to '{}'", column.title);
    }
    Ok(())
}

pub async fn run_remove_column(dir: &Path, actor: &Actor, column: String) -> Result<()> {
    let (store, _lock, board) = open_board(dir, actor).await?;
    let column_id = resolve_column(&board.state(), &column)?;

    let next = board.remove_column(&column_id)?;
    store.save(&next).await?;
    record(
        &store,
        "remove column",
        json!({ "column": column_id.as_str() }),
        actor,
    )
    .await;

    println!("Removed column [{column_id}]");
    Ok(())
}

pub async fn run_label_add(dir: &Path, actor: &Actor, task: String, label: String) -> Result<()> {
    let label = label.trim().to_string();
    if label.is_empty() {
        return Err(BoardError::invalid_value("label", "label must not be empty"));
    }

    let (store, _lock, board) = open_board(dir, actor).await?;
    let task_id = resolve_task(&board.state(), &task)?;

    let next = board.add_label(&task_id, &label);
    store.save(&next).await?;
    record(
        &store,
        "add label",
        json!({ "task": task_id.as_str(), "label": label }),
        actor,
    )
    .await;

    println!("Added label '{label}'");
    Ok(())
}

pub async fn run_label_rm(dir: &Path, actor: &Actor, task: String, label: String) -> Result<()> {
    let (store, _lock, board) = open_board(dir, actor).await?;
    let task_id = resolve_task(&board.state(), &task)?;

    let next = board.remove_label(&task_id, &label);
    store.save(&next).await?;
    record(
        &store,
        "remove label",
        json!({ "task": task_id.as_str(), "label": label }),
        actor,
    )
    .await;

    println!("Removed label '{label}'");
    Ok(())
}

pub async fn run_edit_task(
    dir: &Path,
    actor: &Actor,
    task: String,
    title: Option<String>,
    description: Option<String>,
    assignee: Option<String>,
) -> Result<()> {
    let mut changes = TaskChanges::new();
    if let Some(title) = title {
        changes = changes.with_title(title);
    }
    if let Some(description) = description {
        changes = changes.with_description(description);
    }
    if let Some(assignee) = assignee {
        changes = changes.with_assignee(assignee);
    }
    if changes.is_empty() {
        println!("Nothing to change");
        return Ok(());
    }

    let (store, _lock, board) = open_board(dir, actor).await?;
    let task_id = resolve_task(&board.state(), &task)?;

    let next = board.update_task(&task_id, changes)?;
    store.save(&next).await?;
    record(&store, "edit task", json!({ "task": task_id.as_str() }), actor).await;

    if let Some(task) = next.task(&task_id) {
        println!("Updated task '{}' [{}]", task.title, task.id);
    }
    Ok(())
}

pub async fn run_log(dir: &Path, limit: usize) -> Result<()> {
    let store = FileStore::new(dir);
    let entries = store.journal().read(Some(limit)).await?;

    if entries.is_empty() {
        println!("No activity recorded");
        return Ok(());
    }
    for entry in entries {
        let actor = entry.actor.as_deref().unwrap_or(defaults::UNASSIGNED);
        println!(
            "{}  {:<14} {:<12} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.op,
            actor,
            entry.details
        );
    }
    Ok(())
}
