//! The board state store - single source of truth for one board
//!
//! State lives in a watch channel. Every executed operation replaces the
//! complete snapshot and notifies subscribers, including operations that
//! resolve to a no-op (a stale drop is still a completed gesture). Rejected
//! input is different: the operation returns an error, state is untouched,
//! and nothing is published.
//!
//! Free-form input is normalized at the boundary: titles, descriptions,
//! and labels are stored trimmed. Blank titles are rejected; blank labels
//! are dropped.
//!
//! Mutations are synchronous and applied in call order; the store expects a
//! single logical writer (the UI event loop, a CLI invocation). Persistence
//! is someone else's job - see [`crate::autosave`].

use crate::error::{BoardError, Result};
use crate::types::{Actor, BoardState, Column, ColumnId, Task, TaskChanges, TaskDraft, TaskId};
use tokio::sync::watch;
use tracing::debug;

/// Single source of truth for one board's state
pub struct BoardStore {
    state: watch::Sender<BoardState>,
    actor: Actor,
}

impl BoardStore {
    /// Create a store over an initial state, acting as the given user
    pub fn new(initial: BoardState, actor: Actor) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state, actor }
    }

    /// A freshly seeded board for the anonymous user
    pub fn seeded() -> Self {
        Self::new(BoardState::seeded(), Actor::unassigned())
    }

    /// The acting user; new tasks are assigned to them
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Snapshot of the current state
    pub fn state(&self) -> BoardState {
        self.state.borrow().clone()
    }

    /// Replace the whole state and notify subscribers
    pub fn set_state(&self, next: BoardState) -> BoardState {
        self.publish(next)
    }

    /// Subscribe to state changes. Receivers observe every published
    /// snapshot (coalesced to the latest under load) and never a partial
    /// transition.
    pub fn subscribe(&self) -> watch::Receiver<BoardState> {
        self.state.subscribe()
    }

    fn publish(&self, next: BoardState) -> BoardState {
        self.state.send_replace(next.clone());
        next
    }

    // =========================================================================
    // Column operations
    // =========================================================================

    /// Append a new column with a fresh id
    pub fn add_column(&self, title: impl Into<String>) -> Result<BoardState> {
        let title = title.into();
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::invalid_value(
                "title",
                "column title must not be empty",
            ));
        }

        let mut next = self.state();
        let column = Column::new(title);
        debug!(column = %column.id, title, "column added");
        next.columns.push(column);
        Ok(self.publish(next))
    }

    /// Rename a column; task statuses keep pointing at it
    pub fn rename_column(&self, id: &ColumnId, title: impl Into<String>) -> Result<BoardState> {
        let title = title.into();
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::invalid_value(
                "title",
                "column title must not be empty",
            ));
        }

        let mut next = self.state();
        let column = next
            .columns
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| BoardError::column_not_found(id))?;
        column.title = title.to_string();
        debug!(column = %id, title, "column renamed");
        Ok(self.publish(next))
    }

    /// Remove a column that no task occupies
    pub fn remove_column(&self, id: &ColumnId) -> Result<BoardState> {
        let mut next = self.state();
        let index = next
            .column_index(id)
            .ok_or_else(|| BoardError::column_not_found(id))?;

        let count = next.tasks_in(id);
        if count > 0 {
            return Err(BoardError::ColumnNotEmpty {
                id: id.to_string(),
                count,
            });
        }

        next.columns.remove(index);
        debug!(column = %id, "column removed");
        Ok(self.publish(next))
    }

    /// Move a column from one position to another
    ///
    /// The column is removed first, then inserted at the target position of
    /// the already-shifted sequence, which is what dropping onto a lane
    /// means visually: `[A, B, C]` with A dropped on C becomes `[B, C, A]`.
    /// Equal or out-of-range indices are a stale gesture and resolve to a
    /// no-op (still published).
    pub fn move_column(&self, from: usize, to: usize) -> BoardState {
        let mut next = self.state();
        if from != to && from < next.columns.len() && to < next.columns.len() {
            let column = next.columns.remove(from);
            debug!(column = %column.id, from, to, "column moved");
            next.columns.insert(to, column);
        }
        self.publish(next)
    }

    // =========================================================================
    // Task operations
    // =========================================================================

    /// Create a task from a draft
    ///
    /// The title is trimmed and must be non-empty. Unset status falls back
    /// to the board's default lane; blank labels are dropped; the task is
    /// assigned to the acting user.
    pub fn add_task(&self, draft: TaskDraft) -> Result<BoardState> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(BoardError::invalid_value(
                "title",
                "task title must not be empty",
            ));
        }

        let mut next = self.state();
        let status = match draft.status {
            Some(status) => status,
            None => next
                .default_status()
                .ok_or_else(|| BoardError::invalid_value("status", "board has no columns"))?,
        };

        let labels = draft
            .labels
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();

        let task = Task::new(title, status)
            .with_description(draft.description.trim())
            .with_assignee(&self.actor)
            .with_labels(labels);
        debug!(task = %task.id, title, "task added");
        next.tasks.push(task);
        Ok(self.publish(next))
    }

    /// Move a task to a new status lane
    ///
    /// Unknown task ids are a stale gesture and resolve to a no-op. The
    /// target is not validated: a task whose status names no current column
    /// stays unrendered until such a column exists again.
    pub fn update_task_status(&self, task_id: &TaskId, status: ColumnId) -> BoardState {
        let mut next = self.state();
        match next.tasks.iter_mut().find(|t| &t.id == task_id) {
            Some(task) => {
                debug!(task = %task_id, status = %status, "task status updated");
                task.status = status;
            }
            None => debug!(task = %task_id, "status update for unknown task ignored"),
        }
        self.publish(next)
    }

    /// Apply a partial edit to a task
    pub fn update_task(&self, task_id: &TaskId, changes: TaskChanges) -> Result<BoardState> {
        let title = match changes.title {
            Some(title) => {
                let title = title.trim().to_string();
                if title.is_empty() {
                    return Err(BoardError::invalid_value(
                        "title",
                        "task title must not be empty",
                    ));
                }
                Some(title)
            }
            None => None,
        };

        let mut next = self.state();
        let task = next
            .tasks
            .iter_mut()
            .find(|t| &t.id == task_id)
            .ok_or_else(|| BoardError::task_not_found(task_id))?;

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = description;
        }
        if let Some(assignee) = changes.assignee {
            task.assignee = assignee;
        }
        debug!(task = %task_id, "task updated");
        Ok(self.publish(next))
    }

    /// Add a label to a task; blank labels and unknown tasks are no-ops
    pub fn add_label(&self, task_id: &TaskId, label: &str) -> BoardState {
        let label = label.trim();
        let mut next = self.state();
        if !label.is_empty() {
            if let Some(task) = next.tasks.iter_mut().find(|t| &t.id == task_id) {
                debug!(task = %task_id, label, "label added");
                task.labels.push(label.to_string());
            }
        }
        self.publish(next)
    }

    /// Remove every occurrence of a label from a task
    pub fn remove_label(&self, task_id: &TaskId, label: &str) -> BoardState {
        let mut next = self.state();
        if let Some(task) = next.tasks.iter_mut().find(|t| &t.id == task_id) {
            let before = task.labels.len();
            task.labels.retain(|l| l != label);
            if task.labels.len() != before {
                debug!(task = %task_id, label, "label removed");
            }
        }
        self.publish(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    fn store_with_user() -> BoardStore {
        BoardStore::new(BoardState::seeded(), Actor::new("casey", "Casey"))
    }

    fn add_task(store: &BoardStore, title: &str) -> TaskId {
        let state = store.add_task(TaskDraft::new(title)).unwrap();
        state.tasks.last().unwrap().id.clone()
    }

    // =========================================================================
    // Snapshot + subscribe
    // =========================================================================

    #[test]
    fn test_state_returns_snapshot() {
        let store = BoardStore::seeded();
        let a = store.state();
        let b = store.state();
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_state_replaces_wholesale() {
        let store = BoardStore::seeded();
        let next = BoardState {
            columns: vec![Column::with_id("only", "Only")],
            tasks: Vec::new(),
        };

        let result = store.set_state(next.clone());
        assert_eq!(result, next);
        assert_eq!(store.state(), next);
    }

    #[test]
    fn test_subscribers_see_every_published_snapshot() {
        let store = store_with_user();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.add_column("Review").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().columns.len(), 4);

        // Soft no-ops still publish
        store.move_column(9, 0);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_rejected_input_publishes_nothing() {
        let store = store_with_user();
        let mut rx = store.subscribe();

        assert!(store.add_column("   ").is_err());
        assert!(store.add_task(TaskDraft::new("")).is_err());

        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.state(), BoardState::seeded());
    }

    // =========================================================================
    // Columns
    // =========================================================================

    #[test]
    fn test_add_column_appends_with_fresh_id() {
        let store = store_with_user();
        let state = store.add_column("  Review  ").unwrap();

        assert_eq!(state.columns.len(), 4);
        let added = state.columns.last().unwrap();
        assert_eq!(added.title, "Review");
        assert_eq!(added.id.as_str().len(), 26);
    }

    #[test]
    fn test_add_column_rejects_blank_title() {
        let store = store_with_user();
        let before = store.state();

        let err = store.add_column("   ").unwrap_err();
        assert!(matches!(err, BoardError::InvalidValue { .. }));
        assert_eq!(store.state().columns.len(), before.columns.len());
    }

    #[test]
    fn test_duplicate_column_titles_allowed() {
        let store = store_with_user();
        store.add_column("Review").unwrap();
        let state = store.add_column("Review").unwrap();

        let reviews: Vec<_> = state.columns.iter().filter(|c| c.title == "Review").collect();
        assert_eq!(reviews.len(), 2);
        assert_ne!(reviews[0].id, reviews[1].id);
    }

    #[test]
    fn test_rename_column() {
        let store = store_with_user();
        let id = ColumnId::from_string("todo");
        let task_id = add_task(&store, "stays put");

        let state = store.rename_column(&id, "Backlog").unwrap();
        assert_eq!(state.column(&id).unwrap().title, "Backlog");
        // Renaming is a title edit; statuses keep pointing at the id
        assert_eq!(state.task(&task_id).unwrap().status, id);
    }

    #[test]
    fn test_rename_column_unknown_or_blank() {
        let store = store_with_user();

        let missing = ColumnId::from_string("nope");
        assert!(matches!(
            store.rename_column(&missing, "X"),
            Err(BoardError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            store.rename_column(&ColumnId::from_string("todo"), "  "),
            Err(BoardError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_remove_column_refuses_when_occupied() {
        let store = store_with_user();
        add_task(&store, "occupies todo");

        let err = store.remove_column(&ColumnId::from_string("todo")).unwrap_err();
        match err {
            BoardError::ColumnNotEmpty { id, count } => {
                assert_eq!(id, "todo");
                assert_eq!(count, 1);
            }
            other => panic!("expected ColumnNotEmpty, got {other:?}"),
        }
        assert_eq!(store.state().columns.len(), 3);
    }

    #[test]
    fn test_remove_empty_column() {
        let store = store_with_user();
        let state = store.remove_column(&ColumnId::from_string("completed")).unwrap();
        assert_eq!(state.columns.len(), 2);
        assert!(state.column(&ColumnId::from_string("completed")).is_none());

        assert!(matches!(
            store.remove_column(&ColumnId::from_string("completed")),
            Err(BoardError::ColumnNotFound { .. })
        ));
    }

    // =========================================================================
    // Column reorder
    // =========================================================================

    fn titles(state: &BoardState) -> Vec<&str> {
        state.columns.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn test_move_column_splices() {
        let store = store_with_user();

        // Dragging the first lane onto the last: [A,B,C] -> [B,C,A]
        let state = store.move_column(0, 2);
        assert_eq!(titles(&state), vec!["In Progress", "Completed", "To Do"]);

        let state = store.move_column(2, 0);
        assert_eq!(titles(&state), vec!["To Do", "In Progress", "Completed"]);
    }

    #[test]
    fn test_move_column_roundtrip_restores_order() {
        let store = store_with_user();
        let before = store.state();

        store.move_column(1, 2);
        let after = store.move_column(2, 1);
        assert_eq!(after.columns, before.columns);
    }

    #[test]
    fn test_move_column_noops() {
        let store = store_with_user();
        let before = store.state();

        assert_eq!(store.move_column(1, 1).columns, before.columns);
        assert_eq!(store.move_column(5, 0).columns, before.columns);
        assert_eq!(store.move_column(0, 5).columns, before.columns);
    }

    #[test]
    fn test_move_column_leaves_tasks_alone() {
        let store = store_with_user();
        let task_id = add_task(&store, "anchored");

        let state = store.move_column(0, 2);
        assert_eq!(state.task(&task_id).unwrap().status.as_str(), "todo");
        // The lane moved but the task follows it by id, not by position
        assert_eq!(state.columns[2].id.as_str(), "todo");
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    #[test]
    fn test_add_task_fills_defaults() {
        let store = store_with_user();
        let state = store
            .add_task(
                TaskDraft::new("  Ship the beta  ")
                    .with_description("  cut a release  ")
                    .with_labels(vec!["development".into(), "  ".into(), "".into()]),
            )
            .unwrap();

        let task = &state.tasks[0];
        assert_eq!(task.title, "Ship the beta");
        assert_eq!(task.description, "cut a release");
        assert_eq!(task.status.as_str(), "todo");
        assert_eq!(task.assignee, "Casey");
        assert_eq!(task.assignee_id.as_str(), "casey");
        // Blank labels dropped at the door
        assert_eq!(task.labels, vec!["development".to_string()]);
    }

    #[test]
    fn test_add_task_rejects_blank_title() {
        let store = store_with_user();
        let err = store.add_task(TaskDraft::new("   ")).unwrap_err();
        assert!(matches!(err, BoardError::InvalidValue { .. }));
        assert!(store.state().tasks.is_empty());
    }

    #[test]
    fn test_add_task_explicit_status() {
        let store = store_with_user();
        let state = store
            .add_task(TaskDraft::new("hotfix").with_status(ColumnId::from_string("in-progress")))
            .unwrap();
        assert_eq!(state.tasks[0].status.as_str(), "in-progress");
    }

    #[test]
    fn test_add_task_needs_a_column() {
        let store = BoardStore::new(
            BoardState {
                columns: Vec::new(),
                tasks: Vec::new(),
            },
            Actor::unassigned(),
        );
        assert!(store.add_task(TaskDraft::new("homeless")).is_err());
    }

    #[test]
    fn test_add_task_default_status_without_todo() {
        let store = BoardStore::new(
            BoardState {
                columns: vec![Column::with_id("triage", "Triage")],
                tasks: Vec::new(),
            },
            Actor::unassigned(),
        );
        let state = store.add_task(TaskDraft::new("lands in first lane")).unwrap();
        assert_eq!(state.tasks[0].status.as_str(), "triage");
    }

    #[test]
    fn test_update_task_status_moves_only_status() {
        let store = store_with_user();
        let task_id = add_task(&store, "movable");
        let before = store.state().task(&task_id).unwrap().clone();

        let state = store.update_task_status(&task_id, ColumnId::from_string("completed"));
        let after = state.task(&task_id).unwrap();

        assert_eq!(after.status.as_str(), "completed");
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.assignee, before.assignee);
        assert_eq!(after.labels, before.labels);
        assert_eq!(state.tasks.len(), 1);
    }

    #[test]
    fn test_update_task_status_same_lane_is_idempotent() {
        let store = store_with_user();
        let task_id = add_task(&store, "stationary");
        let before = store.state();

        let after = store.update_task_status(&task_id, ColumnId::from_string("todo"));
        assert_eq!(after, before);
    }

    #[test]
    fn test_update_task_status_unknown_task_ignored() {
        let store = store_with_user();
        add_task(&store, "bystander");
        let before = store.state();

        let ghost = TaskId::from_string("ghost");
        let after = store.update_task_status(&ghost, ColumnId::from_string("completed"));
        assert_eq!(after, before);
    }

    #[test]
    fn test_update_task_status_accepts_dangling_target() {
        let store = store_with_user();
        let task_id = add_task(&store, "parked");

        let state = store.update_task_status(&task_id, ColumnId::from_string("nonexistent"));
        assert_eq!(state.task(&task_id).unwrap().status.as_str(), "nonexistent");
        // Still on the board, just not in any lane
        assert_eq!(state.tasks.len(), 1);
    }

    #[test]
    fn test_update_task_partial_edit() {
        let store = store_with_user();
        let task_id = add_task(&store, "editable");

        let state = store
            .update_task(
                &task_id,
                TaskChanges::new().with_description("now with details"),
            )
            .unwrap();
        let task = state.task(&task_id).unwrap();
        assert_eq!(task.title, "editable");
        assert_eq!(task.description, "now with details");

        let state = store
            .update_task(&task_id, TaskChanges::new().with_assignee("Robin"))
            .unwrap();
        assert_eq!(state.task(&task_id).unwrap().assignee, "Robin");

        // Edited titles land trimmed, like everything else
        let state = store
            .update_task(&task_id, TaskChanges::new().with_title("  Renamed  "))
            .unwrap();
        let task = state.task(&task_id).unwrap();
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.assignee, "Robin");
    }

    #[test]
    fn test_update_task_blank_title_rejected_without_side_effects() {
        let store = store_with_user();
        let task_id = add_task(&store, "keeper");
        let before = store.state();

        let err = store
            .update_task(
                &task_id,
                TaskChanges::new().with_title("  ").with_description("lost"),
            )
            .unwrap_err();
        assert!(matches!(err, BoardError::InvalidValue { .. }));
        assert_eq!(store.state(), before);
    }

    #[test]
    fn test_update_task_unknown_id() {
        let store = store_with_user();
        assert!(matches!(
            store.update_task(&TaskId::from_string("ghost"), TaskChanges::new()),
            Err(BoardError::TaskNotFound { .. })
        ));
    }

    // =========================================================================
    // Labels
    // =========================================================================

    #[test]
    fn test_add_label() {
        let store = store_with_user();
        let task_id = add_task(&store, "labeled");

        store.add_label(&task_id, " design ");
        let state = store.add_label(&task_id, "design");
        // Trimmed, duplicates tolerated
        assert_eq!(
            state.task(&task_id).unwrap().labels,
            vec!["design".to_string(), "design".to_string()]
        );
    }

    #[test]
    fn test_add_label_blank_or_unknown_is_noop() {
        let store = store_with_user();
        let task_id = add_task(&store, "plain");

        store.add_label(&task_id, "   ");
        let state = store.add_label(&TaskId::from_string("ghost"), "design");
        assert!(state.task(&task_id).unwrap().labels.is_empty());
    }

    #[test]
    fn test_remove_label_removes_all_occurrences() {
        let store = store_with_user();
        let task_id = add_task(&store, "overlabeled");
        store.add_label(&task_id, "design");
        store.add_label(&task_id, "development");
        store.add_label(&task_id, "design");

        let state = store.remove_label(&task_id, "design");
        assert_eq!(
            state.task(&task_id).unwrap().labels,
            vec!["development".to_string()]
        );
    }

    #[test]
    fn test_remove_label_missing_is_noop() {
        let store = store_with_user();
        let task_id = add_task(&store, "plain");
        let before = store.state();

        assert_eq!(store.remove_label(&task_id, "absent"), before);
        assert_eq!(store.remove_label(&TaskId::from_string("ghost"), "x"), before);
    }

    // =========================================================================
    // Cross-cutting properties
    // =========================================================================

    #[test]
    fn test_tasks_never_duplicate_across_lanes() {
        let store = store_with_user();
        let a = add_task(&store, "a");
        let b = add_task(&store, "b");
        store.update_task_status(&a, ColumnId::from_string("completed"));
        store.update_task_status(&b, ColumnId::from_string("in-progress"));
        store.update_task_status(&b, ColumnId::from_string("completed"));

        let state = store.state();
        let total: usize = state
            .columns
            .iter()
            .map(|c| state.tasks_in(&c.id))
            .sum();
        assert_eq!(total, state.tasks.len());
    }

    #[test]
    fn test_seeded_uses_defaults() {
        let store = BoardStore::seeded();
        assert!(store.actor().is_unassigned());
        assert_eq!(
            store.state().columns,
            defaults::seed_columns()
        );
    }
}
