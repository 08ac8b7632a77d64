//! Application history ledger
//!
//! Every finished application seen by a poll is remembered here, keyed by
//! application id, until its finish time falls behind the retention horizon.
//! The ledger is what keeps repeated polls over overlapping time ranges from
//! counting the same application twice: an id is inserted once and counted
//! once, when its `processed` latch flips.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;
use yarnstats_api::{ApplicationRecord, deserialize_epoch_millis};
use yarnstats_util::millis_to_secs;

use crate::{CoreResult, QueuesStats};

/// One remembered application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub state: String,
    pub final_status: String,
    /// Lower-cased queue name
    pub queue: String,
    pub application_type: String,
    /// Completion time in milliseconds since the epoch
    #[serde(deserialize_with = "deserialize_epoch_millis")]
    pub finished_time: i64,
    /// Set once the entry has been counted; never cleared
    #[serde(rename = "_processed", deserialize_with = "deserialize_processed")]
    pub processed: bool,
}

impl HistoryEntry {
    fn from_record(record: ApplicationRecord) -> Self {
        Self {
            state: record.state,
            final_status: record.final_status,
            queue: record.queue.to_lowercase(),
            application_type: record.application_type,
            finished_time: record.finished_time,
            processed: false,
        }
    }

    /// Finish time in whole seconds, truncated
    pub fn finished_secs(&self) -> i64 {
        millis_to_secs(self.finished_time)
    }
}

/// Accept the latch as a boolean, or as the `"0"`/`"1"` strings and 0/1
/// integers found in older state files.
fn deserialize_processed<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Latch {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Latch::deserialize(deserializer)? {
        Latch::Bool(b) => Ok(b),
        Latch::Int(n) => Ok(n != 0),
        Latch::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(|n| n != 0)
            .map_err(|_| serde::de::Error::custom(format!("invalid processed flag: {s:?}"))),
    }
}

/// Result of offering one record to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

/// Deduplicated application history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppsHistory {
    entries: BTreeMap<String, HistoryEntry>,
}

impl AppsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a raw record and remember it.
    ///
    /// Fails with `InvalidRecord` if a required field is missing. A record
    /// whose id is already known is ignored, even if its fields differ.
    pub fn insert(&mut self, record: &Value) -> CoreResult<InsertOutcome> {
        let record = ApplicationRecord::from_json(record)?;
        Ok(self.insert_record(record))
    }

    /// Remember an already validated record
    pub fn insert_record(&mut self, record: ApplicationRecord) -> InsertOutcome {
        if self.entries.contains_key(&record.id) {
            debug!(app_id = %record.id, "Duplicate application ignored");
            return InsertOutcome::Duplicate;
        }

        let id = record.id.clone();
        self.entries.insert(id, HistoryEntry::from_record(record));
        InsertOutcome::Inserted
    }

    /// Forget every application that finished before `horizon_secs`.
    ///
    /// An entry finishing exactly at the horizon is kept. Returns the number
    /// of entries removed.
    pub fn purge(&mut self, horizon_secs: i64) -> usize {
        if self.entries.is_empty() {
            return 0;
        }

        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.finished_secs() >= horizon_secs);
        let removed = before - self.entries.len();

        debug!(removed, horizon_secs, "History purged");
        removed
    }

    /// Count every not-yet-processed entry into `stats` and latch it.
    ///
    /// Returns the number of entries counted; a second call in a row
    /// returns zero.
    pub fn promote(&mut self, stats: &mut QueuesStats) -> usize {
        let mut promoted = 0;

        for entry in self.entries.values_mut().filter(|e| !e.processed) {
            stats.update(&entry.queue, &entry.state, &entry.final_status);
            entry.processed = true;
            promoted += 1;
        }

        promoted
    }

    pub fn get(&self, app_id: &str) -> Option<&HistoryEntry> {
        self.entries.get(app_id)
    }

    pub fn contains(&self, app_id: &str) -> bool {
        self.entries.contains_key(app_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HistoryEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Number of entries still waiting to be counted
    pub fn pending(&self) -> usize {
        self.entries.values().filter(|e| !e.processed).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
