//! Snapshot persistence for BIGO boards
//!
//! A board lives in memory; this crate is the gateway it saves through. The
//! gateway is a small async trait ([`SnapshotStore`]) with two verbs: `load`
//! the last saved value (or `None` on first use) and `save` a complete
//! replacement. Callers treat saves as fire-and-forget - a failed save is
//! logged by the caller and never rolls back in-memory state.
//!
//! Two implementations ship here:
//!
//! - [`MemoryStore`] - a mutex slot, used as the fake in tests
//! - [`FileStore`] - a directory-rooted JSON file with atomic writes and an
//!   advisory lock for cross-process exclusion
//!
//! Alongside the snapshot, [`Journal`] keeps an append-only JSONL record of
//! the operations that produced it, newest read first.
//!
//! ## Storage structure
//!
//! ```text
//! <root>/
//! ├── snapshot.json    # Complete board state (pretty JSON, atomic writes)
//! ├── journal.jsonl    # Operation log (one JSON object per line)
//! └── .lock            # Advisory lock file
//! ```

mod error;
mod file;
mod journal;
mod snapshot;

pub use error::{Result, StoreError};
pub use file::{FileStore, StoreLock};
pub use journal::{Journal, JournalEntry};
pub use snapshot::{MemoryStore, SnapshotStore};
