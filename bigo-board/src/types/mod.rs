//! Core types for the board engine

mod board;
mod ids;
mod task;

// Re-export all types
pub use board::{Actor, BoardState, Column};
pub use ids::{ActorId, ColumnId, TaskId};
pub use task::{Task, TaskChanges, TaskDraft};
