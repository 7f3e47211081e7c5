//! Channel records.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::observability::metrics;
use crate::store::{DocumentName, Ledger, Store};

/// Best streak ever reached in a channel and who reached it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    /// Record holder.
    pub user: String,
    /// Consecutive survivals.
    pub streak: u64,
}

/// Keeps one [`Record`] per channel, persisted to `record.json`.
///
/// Records only ever go up and are never cleared by the daily reset.
#[derive(Debug)]
pub struct RecordTracker {
    ledger: Ledger<Record>,
}

impl RecordTracker {
    /// Loads the records document from `store`.
    pub fn open(store: Arc<dyn Store>) -> Self {
        Self {
            ledger: Ledger::open(DocumentName::Records, store),
        }
    }

    /// Offers `streak` by `user` as the new channel record.
    ///
    /// Replaces the record when none exists or `streak` is strictly greater
    /// than the current one; ties keep the earlier holder. Returns `true` if
    /// the record was replaced.
    pub fn update(&self, channel: &str, user: &str, streak: u64) -> bool {
        let beaten = self
            .ledger
            .get(channel)
            .is_none_or(|current| streak > current.streak);
        if !beaten {
            return false;
        }

        self.ledger.commit(channel, Record {
            user: user.to_owned(),
            streak,
        });
        info!(channel, user, streak, "channel record set");
        metrics::record_record_broken();
        true
    }

    /// Returns the current record of `channel`.
    #[must_use]
    pub fn get(&self, channel: &str) -> Option<Record> {
        self.ledger.get(channel)
    }
}
