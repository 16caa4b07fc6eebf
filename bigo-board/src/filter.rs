//! Read-side filtering of the task list
//!
//! Filters are pure views: they narrow what is rendered and never mutate
//! tasks. Both dimensions default to the `"all"` sentinel, and active
//! filters combine conjunctively. Tasks always come back in board order,
//! so filtering and partitioning are stable.

use crate::types::{ColumnId, Task};

/// One filter dimension: everything, or a single required value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterChoice {
    #[default]
    All,
    Only(String),
}

impl FilterChoice {
    /// Parse a selection, treating `"all"` as the pass-everything sentinel
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == value,
        }
    }
}

/// The board's active filters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFilters {
    pub label: FilterChoice,
    pub assignee: FilterChoice,
}

impl TaskFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = FilterChoice::Only(label.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = FilterChoice::Only(assignee.into());
        self
    }

    /// Whether a task passes every active dimension
    ///
    /// The label dimension asks for containment (any of the task's labels),
    /// the assignee dimension for equality with the display name.
    pub fn accepts(&self, task: &Task) -> bool {
        let label_ok = match &self.label {
            FilterChoice::All => true,
            FilterChoice::Only(label) => task.labels.iter().any(|l| l == label),
        };
        label_ok && self.assignee.matches(&task.assignee)
    }
}

/// Narrow the task list to those passing the filters, preserving order
pub fn filter_tasks<'a>(tasks: &'a [Task], filters: &TaskFilters) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filters.accepts(t)).collect()
}

/// The slice of an already-filtered list that belongs to one lane
///
/// Tasks whose status matches no current column appear in no lane.
pub fn column_tasks<'a>(tasks: &[&'a Task], column: &ColumnId) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| &t.status == column)
        .copied()
        .collect()
}

/// Distinct assignee names in first-appearance order, for the filter menu
pub fn assignee_options(tasks: &[Task]) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for task in tasks {
        if !options.iter().any(|o| o == &task.assignee) {
            options.push(task.assignee.clone());
        }
    }
    options
}
