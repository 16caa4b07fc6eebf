//! The snapshot gateway trait and the in-memory implementation

use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Where a board saves itself.
///
/// `load` answers `Ok(None)` when nothing has ever been saved - first use is
/// not an error. `save` replaces the whole snapshot; there is no partial
/// update, which is what makes last-write-wins the complete consistency
/// story. Implementations are injected as `Arc<dyn SnapshotStore<T>>` so the
/// core model never knows whether it is talking to a file, a server, or a
/// test fake.
#[async_trait]
pub trait SnapshotStore<T>: Send + Sync
where
    T: Send + Sync,
{
    /// Load the last saved value, `Ok(None)` on first use
    async fn load(&self) -> Result<Option<T>>;

    /// Persist a complete replacement snapshot
    async fn save(&self, value: &T) -> Result<()>;
}

/// In-memory store - a mutex slot
///
/// The test fake, and good enough for ephemeral boards.
#[derive(Debug)]
pub struct MemoryStore<T> {
    slot: Mutex<Option<T>>,
}

impl<T> MemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Create a store pre-seeded with a value
    pub fn with_value(value: T) -> Self {
        Self {
            slot: Mutex::new(Some(value)),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> SnapshotStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> Result<Option<T>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, value: &T) -> Result<()> {
        *self.slot.lock().await = Some(value.clone());
        Ok(())
    }
}
