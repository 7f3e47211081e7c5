//! Typed, channel-keyed view over a persisted document.
//!
//! A [`Ledger`] is the in-memory source of truth for one document. It is
//! loaded once at startup and written back in full on every commit. Storage
//! failures are logged and counted but never returned: a bad read starts the
//! ledger empty, a bad write keeps the in-memory value until the next
//! successful save.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::{DocumentName, Store};
use crate::error::StoreError;
use crate::observability::metrics;

/// Channel → payload map backed by a [`Store`] document.
pub struct Ledger<T> {
    name: DocumentName,
    store: Arc<dyn Store>,
    // Held for the serialize + save as well, so writes of this document never
    // interleave. Always acquired after the engine's channel lock.
    entries: Mutex<BTreeMap<String, T>>,
}

impl<T> Ledger<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Loads a ledger from `store`.
    ///
    /// A missing, unreadable or malformed document yields an empty ledger.
    pub fn open(name: DocumentName, store: Arc<dyn Store>) -> Self {
        let entries = match store.load(name) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(source) => {
                    let err = StoreError::Malformed {
                        document: name,
                        source,
                    };
                    warn!(document = %name, error = %err, "starting from an empty document");
                    metrics::record_store_error("load");
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(err) => {
                warn!(document = %name, error = %err, "starting from an empty document");
                metrics::record_store_error("load");
                BTreeMap::new()
            }
        };

        Self {
            name,
            store,
            entries: Mutex::new(entries),
        }
    }

    /// Returns the document this ledger persists to.
    #[must_use]
    pub const fn name(&self) -> DocumentName {
        self.name
    }

    /// Returns a copy of the payload stored for `channel`.
    #[must_use]
    pub fn get(&self, channel: &str) -> Option<T> {
        self.lock().get(channel).cloned()
    }

    /// Returns the channels currently present, in sorted order.
    #[must_use]
    pub fn channels(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Stores `value` for `channel` and writes the whole document.
    ///
    /// Returns `true` if the write reached the store. A failed write is
    /// logged; the new value stays in memory either way.
    pub fn commit(&self, channel: &str, value: T) -> bool {
        let mut entries = self.lock();
        entries.insert(channel.to_owned(), value);

        let result = serde_json::to_string_pretty(&*entries)
            .map_err(|source| StoreError::Malformed {
                document: self.name,
                source,
            })
            .and_then(|text| self.store.save(self.name, &text));
        drop(entries);

        match result {
            Ok(()) => true,
            Err(err) => {
                warn!(document = %self.name, channel, error = %err, "failed to save document");
                metrics::record_store_error("save");
                false
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, T>> {
        // A panic while holding the lock cannot leave the map half-updated:
        // every mutation is a single insert.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> fmt::Debug for Ledger<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
