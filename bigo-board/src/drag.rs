//! Drag-and-drop gesture tracking
//!
//! Two independent trackers, one per draggable kind. Neither touches board
//! state: they watch a gesture unfold and, on drop, emit the effect the
//! caller applies to a [`crate::BoardStore`] ([`ColumnReorder`] via
//! `move_column`, [`TaskMove`] via `update_task_status`). A drop outside
//! any target, or a cancel, emits nothing and resets the tracker.

use crate::types::{ColumnId, TaskId};

/// Effect of a completed column drag: splice `from` out, insert at `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnReorder {
    pub from: usize,
    pub to: usize,
}

/// Effect of a completed task drag: move the task to a status lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    pub task: TaskId,
    pub status: ColumnId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ColumnState {
    #[default]
    Idle,
    Dragging {
        source: usize,
    },
    Hovering {
        source: usize,
        target: usize,
    },
}

/// Tracks a column drag by position
///
/// ```text
/// Idle --drag_start--> Dragging --drag_over--> Hovering --drop--> Idle
/// ```
///
/// A new `drag_start` in any state begins a fresh gesture; the browser is
/// free to lose the end of the previous one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnDrag {
    state: ColumnState,
}

impl ColumnDrag {
    pub fn new() -> Self {
        Self::default()
    }

    /// A column at `source` started being dragged
    pub fn on_drag_start(&mut self, source: usize) {
        self.state = ColumnState::Dragging { source };
    }

    /// The pointer is over the column at `target`; ignored when idle
    pub fn on_drag_over(&mut self, target: usize) {
        match self.state {
            ColumnState::Idle => {}
            ColumnState::Dragging { source } | ColumnState::Hovering { source, .. } => {
                self.state = ColumnState::Hovering { source, target };
            }
        }
    }

    /// The drag ended. Yields a reorder only for a drop on a different
    /// column; always resets to idle.
    pub fn on_drop(&mut self) -> Option<ColumnReorder> {
        let state = std::mem::take(&mut self.state);
        match state {
            ColumnState::Hovering { source, target } if source != target => {
                Some(ColumnReorder {
                    from: source,
                    to: target,
                })
            }
            _ => None,
        }
    }

    /// Abandon the gesture without an effect
    pub fn cancel(&mut self) {
        self.state = ColumnState::Idle;
    }

    /// Index of the column being dragged, if any
    pub fn source(&self) -> Option<usize> {
        match self.state {
            ColumnState::Idle => None,
            ColumnState::Dragging { source } | ColumnState::Hovering { source, .. } => Some(source),
        }
    }

    /// Index of the column currently hovered over, if any
    pub fn target(&self) -> Option<usize> {
        match self.state {
            ColumnState::Hovering { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// Tracks a task drag by id; at most one task is in flight
#[derive(Debug, Clone, Default)]
pub struct TaskDrag {
    dragging: Option<TaskId>,
}

impl TaskDrag {
    pub fn new() -> Self {
        Self::default()
    }

    /// A task started being dragged, replacing any stale gesture
    pub fn on_drag_start(&mut self, task: TaskId) {
        self.dragging = Some(task);
    }

    /// The task was dropped onto a status lane
    pub fn on_drop(&mut self, status: ColumnId) -> Option<TaskMove> {
        self.dragging.take().map(|task| TaskMove { task, status })
    }

    /// Abandon the gesture without an effect
    pub fn cancel(&mut self) {
        self.dragging = None;
    }

    /// The task in flight, if any
    pub fn dragging(&self) -> Option<&TaskId> {
        self.dragging.as_ref()
    }
}
