//! Per-queue outcome counters

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use yarnstats_api::CounterBucket;

use crate::{CoreError, CoreResult, classify};

/// The seven counters of one queue. Counters only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueCounters {
    #[serde(rename = "finished.succeeded", default)]
    finished_succeeded: u64,
    #[serde(rename = "finished.failed", default)]
    finished_failed: u64,
    #[serde(rename = "finished.killed", default)]
    finished_killed: u64,
    #[serde(rename = "finished.undefined", default)]
    finished_undefined: u64,
    #[serde(default)]
    failed: u64,
    #[serde(default)]
    killed: u64,
    #[serde(default)]
    other: u64,
}

impl QueueCounters {
    pub fn get(&self, bucket: CounterBucket) -> u64 {
        match bucket {
            CounterBucket::FinishedSucceeded => self.finished_succeeded,
            CounterBucket::FinishedFailed => self.finished_failed,
            CounterBucket::FinishedKilled => self.finished_killed,
            CounterBucket::FinishedUndefined => self.finished_undefined,
            CounterBucket::Failed => self.failed,
            CounterBucket::Killed => self.killed,
            CounterBucket::Other => self.other,
        }
    }

    fn slot(&mut self, bucket: CounterBucket) -> &mut u64 {
        match bucket {
            CounterBucket::FinishedSucceeded => &mut self.finished_succeeded,
            CounterBucket::FinishedFailed => &mut self.finished_failed,
            CounterBucket::FinishedKilled => &mut self.finished_killed,
            CounterBucket::FinishedUndefined => &mut self.finished_undefined,
            CounterBucket::Failed => &mut self.failed,
            CounterBucket::Killed => &mut self.killed,
            CounterBucket::Other => &mut self.other,
        }
    }

    pub fn increment(&mut self, bucket: CounterBucket) {
        let slot = self.slot(bucket);
        *slot = slot.saturating_add(1);
    }

    /// Sum over all buckets
    pub fn total(&self) -> u64 {
        CounterBucket::ALL.iter().map(|b| self.get(*b)).sum()
    }
}

/// Counters keyed by queue name. Queues appear on their first classified
/// application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueuesStats {
    queues: BTreeMap<String, QueueCounters>,
}

impl QueuesStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify an outcome and count it against `queue`
    pub fn update(&mut self, queue: &str, state: &str, final_status: &str) -> CounterBucket {
        let bucket = classify(state, final_status);
        self.queues
            .entry(queue.to_string())
            .or_default()
            .increment(bucket);
        bucket
    }

    /// Read one counter. `bucket` must be one of the fixed bucket names.
    pub fn get(&self, queue: &str, bucket: &str) -> CoreResult<u64> {
        let counters = self
            .queues
            .get(queue)
            .ok_or_else(|| CoreError::not_found(format!("queue '{}'", queue)))?;
        let bucket: CounterBucket = bucket
            .parse()
            .map_err(|e: yarnstats_api::UnknownBucket| CoreError::not_found(e.to_string()))?;
        Ok(counters.get(bucket))
    }

    pub fn queue(&self, queue: &str) -> Option<&QueueCounters> {
        self.queues.get(queue)
    }

    pub fn queue_names(&self) -> impl Iterator<Item = &str> {
        self.queues.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}
