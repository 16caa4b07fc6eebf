//! Task types: Task, TaskDraft, TaskChanges

use super::board::Actor;
use super::ids::{ActorId, ColumnId, TaskId};
use crate::defaults;
use serde::{Deserialize, Serialize};

/// A card on the board
///
/// `status` holds the id of the containing column. A status that names no
/// current column leaves the task unrendered but intact; it is never
/// rewritten behind the user's back.
///
/// Snapshot tasks written by older versions may lack fields; each one falls
/// back the way the web client normalized localStorage data (missing status
/// lands in `todo`, missing assignee becomes the anonymous fallback).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    #[serde(default)]
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "defaults::fallback_status")]
    pub status: ColumnId,
    /// Display name shown on the card
    #[serde(default = "defaults::unassigned_name")]
    pub assignee: String,
    #[serde(default = "defaults::unassigned_id")]
    pub assignee_id: ActorId,
    /// Ordered, duplicates tolerated
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Task {
    /// Create a task with a fresh id, unassigned
    pub fn new(title: impl Into<String>, status: ColumnId) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: String::new(),
            status,
            assignee: defaults::unassigned_name(),
            assignee_id: defaults::unassigned_id(),
            labels: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Assign to an actor
    pub fn with_assignee(mut self, assignee: &Actor) -> Self {
        self.assignee = assignee.name.clone();
        self.assignee_id = assignee.id.clone();
        self
    }

    /// Set the labels
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Check if the task carries the given label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// Input for creating a task; unset fields fall back to board defaults
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// Column to land in; the board's default lane when `None`
    pub status: Option<ColumnId>,
    pub labels: Vec<String>,
}

impl TaskDraft {
    /// Start a draft with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Land in a specific column instead of the default lane
    pub fn with_status(mut self, status: ColumnId) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the labels
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }
}

/// A partial task edit; unset fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    /// New display name; the assignee id is not rewritten
    pub assignee: Option<String>,
}

impl TaskChanges {
    /// Start an empty edit
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Change the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Change the assignee display name
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Check if the edit changes anything
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.assignee.is_none()
    }
}
