//! Task board engine for BIGO
//!
//! The board is a list of columns (status lanes) and a list of tasks, each
//! task pointing at its column by id. All of it lives in a [`BoardStore`]:
//! one in-memory source of truth whose every transition replaces the complete
//! snapshot and notifies subscribers. Persistence hangs off a subscriber (see
//! [`autosave`]) and is fire-and-forget - storage failures never roll back
//! what the user sees.
//!
//! Drag-and-drop is modeled as two small state machines ([`ColumnDrag`] and
//! [`TaskDrag`]) that turn gestures into effects; the caller applies an
//! effect through the store, or discards it when the gesture resolved to
//! nothing. Filtering ([`filter`]) is a read-side view and never mutates
//! board state.
//!
//! ## Basic usage
//!
//! ```rust
//! use bigo_board::{BoardStore, TaskDraft};
//!
//! let store = BoardStore::seeded();
//! let state = store.add_task(TaskDraft::new("Ship the beta")).unwrap();
//!
//! assert_eq!(state.columns.len(), 3);
//! assert_eq!(state.tasks[0].status, state.columns[0].id);
//! ```

pub mod autosave;
pub mod defaults;
mod drag;
mod error;
pub mod filter;
mod store;
pub mod types;

pub use drag::{ColumnDrag, ColumnReorder, TaskDrag, TaskMove};
pub use error::{BoardError, Result};
pub use filter::{FilterChoice, TaskFilters};
pub use store::BoardStore;
pub use types::{Actor, ActorId, BoardState, Column, ColumnId, Task, TaskChanges, TaskDraft, TaskId};
