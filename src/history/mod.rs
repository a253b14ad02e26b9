// History layer: bounded, durable record of past analyses.
//
// The persisted form is one JSON document in a single storage slot (a
// file under the platform data dir by default). Everything loads up
// front; a missing or corrupt slot just means an empty history.

pub mod storage;
pub mod store;

pub use storage::{FileSlot, MemorySlot, StorageError, StorageSlot};
pub use store::{HistoryEntry, HistoryStore, MAX_HISTORY};

use std::path::Path;

/// Open the history store backed by the file at `path`.
pub fn open(path: &Path) -> HistoryStore {
    HistoryStore::load(Box::new(FileSlot::new(path)))
}
