//! In-memory store.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;

use super::{DocumentName, Store};
use crate::error::StoreError;

/// Store that keeps documents in a `DashMap`.
///
/// Writes can be switched off to exercise the write-failure path; while
/// disabled every save returns [`StoreError::WriteDisabled`] and the last
/// good snapshot is kept.
#[derive(Debug)]
pub struct MemoryStore {
    documents: DashMap<DocumentName, String>,
    writes_enabled: AtomicBool,
    saves: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store with writes enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
            writes_enabled: AtomicBool::new(true),
            saves: AtomicU64::new(0),
        }
    }

    /// Seeds a document, as if it had been saved by an earlier run.
    #[must_use]
    pub fn with_document(self, name: DocumentName, contents: impl Into<String>) -> Self {
        self.documents.insert(name, contents.into());
        self
    }

    /// Enables or disables writes.
    pub fn set_writes_enabled(&self, enabled: bool) {
        self.writes_enabled.store(enabled, Ordering::SeqCst);
    }

    /// Returns the current text of a document.
    #[must_use]
    pub fn document(&self, name: DocumentName) -> Option<String> {
        self.documents.get(&name).map(|doc| doc.value().clone())
    }

    /// Number of successful saves across all documents.
    #[must_use]
    pub fn saves(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn load(&self, name: DocumentName) -> Result<Option<String>, StoreError> {
        Ok(self.document(name))
    }

    fn save(&self, name: DocumentName, contents: &str) -> Result<(), StoreError> {
        if !self.writes_enabled.load(Ordering::SeqCst) {
            return Err(StoreError::WriteDisabled { document: name });
        }
        self.documents.insert(name, contents.to_owned());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
