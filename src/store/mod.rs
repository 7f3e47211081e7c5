//! Persistent key-value store
//!
//! Each of the three data sets (standard counters, limited counters, channel
//! records) is saved as one whole JSON document. A [`Store`] only moves raw
//! document text; the typed view and the failure policy live in [`Ledger`].
//!
//! # Backends
//!
//! - [`JsonFileStore`]: one file per document in a data directory, written
//!   through a temporary file and an atomic rename
//! - [`MemoryStore`]: in-process documents for tests and throwaway runs

pub mod file;
pub mod ledger;
pub mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub use file::JsonFileStore;
pub use ledger::Ledger;
pub use memory::MemoryStore;

/// The three documents the engine persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentName {
    /// Standard-mode streaks, channel → user → streak.
    Counters,
    /// Limited-mode state, channel → user → `{shotsTaken, streak}`.
    LimitedCounters,
    /// Channel records, channel → `{user, streak}`.
    Records,
}

impl DocumentName {
    /// All documents, in load order.
    pub const ALL: [Self; 3] = [Self::Counters, Self::LimitedCounters, Self::Records];

    /// File name used by [`JsonFileStore`].
    ///
    /// These names match the files written by earlier deployments so an
    /// existing data directory can be reused as-is.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Counters => "counters.json",
            Self::LimitedCounters => "limited_counters.json",
            Self::Records => "record.json",
        }
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Durable storage for whole-document snapshots.
///
/// Implementations must be safe to share across threads. Callers serialize
/// writes to the same document, so a backend does not need its own locking
/// for that case.
pub trait Store: Send + Sync + fmt::Debug {
    /// Loads the raw text of a document.
    ///
    /// Returns `Ok(None)` when the document has never been saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be read.
    fn load(&self, name: DocumentName) -> Result<Option<String>, StoreError>;

    /// Replaces the stored text of a document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the document cannot be written.
    fn save(&self, name: DocumentName, contents: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_match_legacy_layout() {
        assert_eq!(DocumentName::Counters.file_name(), "counters.json");
        assert_eq!(
            DocumentName::LimitedCounters.file_name(),
            "limited_counters.json"
        );
        assert_eq!(DocumentName::Records.file_name(), "record.json");
    }

    #[test]
    fn display_is_file_name() {
        assert_eq!(DocumentName::Records.to_string(), "record.json");
    }

    #[test]
    fn all_lists_each_document_once() {
        let mut names = DocumentName::ALL.to_vec();
        names.dedup();
        assert_eq!(names.len(), 3);
    }
}
