//! Poll engine
//!
//! Applies one batch of freshly fetched application records to the state:
//! insert into the history, purge what fell behind the horizon, promote the
//! new entries into the queue counters, then stamp the poll variables.

use serde_json::Value;
use tracing::{info, warn};
use yarnstats_api::{LASTPOLL_ADDED, LASTPOLL_AT, LASTPOLL_REMOVED, POLLS_TOTAL};

use crate::{InsertOutcome, ScriptState};

/// What one poll did to the state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    /// Records in the batch
    pub received: usize,
    /// Records new to the history
    pub inserted: usize,
    /// Records already known by id
    pub duplicates: usize,
    /// Records missing required fields
    pub rejected: usize,
    /// History entries dropped by the horizon
    pub removed: usize,
    /// History entries counted into the queue counters
    pub promoted: usize,
}

/// Owns the state for the duration of one invocation
#[derive(Debug, Default)]
pub struct StatsEngine {
    state: ScriptState,
}

impl StatsEngine {
    pub fn new(state: ScriptState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ScriptState {
        &self.state
    }

    pub fn into_state(self) -> ScriptState {
        self.state
    }

    /// Apply a batch of raw application records.
    ///
    /// Invalid records are skipped and counted as rejected; the rest of the
    /// batch is still applied.
    pub fn ingest(&mut self, apps: &[Value], horizon_secs: i64, now_secs: i64) -> PollSummary {
        let mut summary = PollSummary {
            received: apps.len(),
            ..Default::default()
        };

        for app in apps {
            match self.state.apps_history.insert(app) {
                Ok(InsertOutcome::Inserted) => summary.inserted += 1,
                Ok(InsertOutcome::Duplicate) => summary.duplicates += 1,
                Err(e) => {
                    let app_id = app.get("id").and_then(Value::as_str).unwrap_or("<unknown>");
                    warn!(app_id, error = %e, "Skipping application record");
                    summary.rejected += 1;
                }
            }
        }

        summary.removed = self.state.apps_history.purge(horizon_secs);
        summary.promoted = self
            .state
            .apps_history
            .promote(&mut self.state.queues_stats);

        self.record_poll(&summary, now_secs);

        info!(
            received = summary.received,
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            rejected = summary.rejected,
            removed = summary.removed,
            promoted = summary.promoted,
            history_len = self.state.apps_history.len(),
            "Poll applied"
        );

        summary
    }

    fn record_poll(&mut self, summary: &PollSummary, now_secs: i64) {
        let vars = &mut self.state.local_vars;
        vars.set(LASTPOLL_AT, now_secs);
        vars.set(LASTPOLL_ADDED, summary.promoted);
        vars.set(LASTPOLL_REMOVED, summary.removed);

        if let Err(e) = vars.add_int(POLLS_TOTAL, 1) {
            warn!(error = %e, "Resetting poll counter");
            vars.set(POLLS_TOTAL, 1);
        }
    }
}
