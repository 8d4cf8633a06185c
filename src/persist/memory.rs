use std::sync::Arc;

use parking_lot::Mutex;

use super::{PersistError, SnapshotStore};

/// In-process snapshot slot.
///
/// Clones share the same slot, so a test can keep one handle to inspect
/// what the container wrote through the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `contents`, as if saved by an earlier run.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let store = Self::default();
        *store.slot.lock() = Some(contents.into());
        store
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().clone()
    }

    /// Number of successful saves.
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, PersistError> {
        Ok(self.contents())
    }

    fn save(&self, contents: &str) -> Result<(), PersistError> {
        *self.slot.lock() = Some(contents.to_string());
        *self.writes.lock() += 1;
        Ok(())
    }
}
