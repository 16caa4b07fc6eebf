//! Persistence bridge between a [`BoardStore`] and a [`SnapshotStore`]
//!
//! Loading happens once at startup and degrades to a seeded board rather
//! than failing. Saving runs in a background task fed by the store's watch
//! channel: every published snapshot is written out, a failed write is
//! logged and in-memory state stays authoritative. The loop drains the
//! last snapshot after the store is dropped, so awaiting the handle on
//! shutdown guarantees the final state reached the store.
//!
//! [`BoardStore`]: crate::BoardStore

use crate::types::BoardState;
use bigo_store::SnapshotStore;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Load a board from the store, falling back to a seeded board
///
/// A missing snapshot is the first-run case; an unreadable one is logged
/// and treated the same. Neither prevents the board from opening.
pub async fn load_board(store: &dyn SnapshotStore<BoardState>) -> BoardState {
    match store.load().await {
        Ok(Some(state)) => state,
        Ok(None) => BoardState::default(),
        Err(error) => {
            warn!(%error, "failed to load board snapshot; starting fresh");
            BoardState::default()
        }
    }
}

/// Persist every published snapshot until the sending store is dropped
///
/// Rapid successive changes coalesce: the loop always writes the latest
/// snapshot, which is safe because saves are whole-state writes.
pub fn spawn_autosave(
    mut rx: watch::Receiver<BoardState>,
    store: Arc<dyn SnapshotStore<BoardState>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            if let Err(error) = store.save(&snapshot).await {
                warn!(%error, "autosave failed; keeping in-memory state");
            }
        }
        debug!("autosave loop stopped");
    })
}
