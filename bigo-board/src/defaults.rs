//! Seed data and fallback values for boards
//!
//! These mirror what a fresh board looks like before anyone touches it:
//! three lanes, a fixed label vocabulary for pickers, and the anonymous
//! assignee used when no user is signed in.

use crate::types::{ActorId, Column, ColumnId};

/// Display name used when no user is signed in
pub const UNASSIGNED: &str = "Unassigned";

/// Slug of the seed column new tasks land in
pub const DEFAULT_COLUMN_SLUG: &str = "todo";

/// Fixed label vocabulary offered by task editors.
///
/// Filtering accepts any string; this list only feeds pickers.
pub const LABEL_OPTIONS: [&str; 4] = ["development", "marketing", "design", "management"];

/// The three seed columns of a fresh board
pub fn seed_columns() -> Vec<Column> {
    vec![
        Column::with_id(DEFAULT_COLUMN_SLUG, "To Do"),
        Column::with_id("in-progress", "In Progress"),
        Column::with_id("completed", "Completed"),
    ]
}

/// Status given to snapshot tasks that are missing one
pub(crate) fn fallback_status() -> ColumnId {
    ColumnId::from_string(DEFAULT_COLUMN_SLUG)
}

/// Assignee name given to snapshot tasks that are missing one
pub(crate) fn unassigned_name() -> String {
    UNASSIGNED.to_string()
}

/// Assignee id given to snapshot tasks that are missing one
pub(crate) fn unassigned_id() -> ActorId {
    ActorId::from_string("")
}
