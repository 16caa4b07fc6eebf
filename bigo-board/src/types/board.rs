//! Board-level types: BoardState, Column, Actor

use super::ids::{ActorId, ColumnId, TaskId};
use super::task::Task;
use crate::defaults;
use serde::{Deserialize, Serialize};

/// A column is a status lane. Its order on the board is its position in
/// `BoardState::columns`, not a field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    #[serde(default)]
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    /// Create a column with a fresh ULID id
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ColumnId::new(),
            title: title.into(),
        }
    }

    /// Create a column with a fixed id (seed columns)
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ColumnId::from_string(id),
            title: title.into(),
        }
    }
}

/// The acting user; new tasks are assigned to them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
}

impl Actor {
    /// Create an actor
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ActorId::from_string(id),
            name: name.into(),
        }
    }

    /// The anonymous fallback when no user is signed in
    pub fn unassigned() -> Self {
        Self {
            id: ActorId::from_string(""),
            name: defaults::UNASSIGNED.to_string(),
        }
    }

    /// Check if this is the anonymous fallback
    pub fn is_unassigned(&self) -> bool {
        self.id.is_empty()
    }
}

/// Complete board state. Every store transition replaces this wholesale, so
/// subscribers never observe a half-applied change.
///
/// Deserialization tolerates partial snapshots: missing columns fall back to
/// the seed set and each task fills its own missing fields (see `Task`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardState {
    #[serde(default = "defaults::seed_columns")]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl BoardState {
    /// A fresh board: the three seed lanes, no tasks
    pub fn seeded() -> Self {
        Self {
            columns: defaults::seed_columns(),
            tasks: Vec::new(),
        }
    }

    /// Find a column by id
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Find a column's position by id
    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    /// Find a task by id
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Column that tasks created without an explicit status land in: the
    /// seed `todo` lane if it still exists, otherwise the first column.
    pub fn default_status(&self) -> Option<ColumnId> {
        let todo = ColumnId::from_string(defaults::DEFAULT_COLUMN_SLUG);
        if self.column(&todo).is_some() {
            return Some(todo);
        }
        self.columns.first().map(|c| c.id.clone())
    }

    /// Number of tasks whose status points at the given column
    pub fn tasks_in(&self, id: &ColumnId) -> usize {
        self.tasks.iter().filter(|t| &t.status == id).count()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::seeded()
    }
}
