//! Per-queue counter buckets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the seven mutually exclusive outcome counters kept per queue.
///
/// Variants are declared in table order; serialized names are the dotted
/// names used in the state file and in query paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CounterBucket {
    #[serde(rename = "finished.succeeded")]
    FinishedSucceeded,
    #[serde(rename = "finished.failed")]
    FinishedFailed,
    #[serde(rename = "finished.killed")]
    FinishedKilled,
    #[serde(rename = "finished.undefined")]
    FinishedUndefined,
    #[serde(rename = "failed")]
    Failed,
    #[serde(rename = "killed")]
    Killed,
    #[serde(rename = "other")]
    Other,
}

impl CounterBucket {
    /// Every bucket, in table order
    pub const ALL: [CounterBucket; 7] = [
        CounterBucket::FinishedSucceeded,
        CounterBucket::FinishedFailed,
        CounterBucket::FinishedKilled,
        CounterBucket::FinishedUndefined,
        CounterBucket::Failed,
        CounterBucket::Killed,
        CounterBucket::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CounterBucket::FinishedSucceeded => "finished.succeeded",
            CounterBucket::FinishedFailed => "finished.failed",
            CounterBucket::FinishedKilled => "finished.killed",
            CounterBucket::FinishedUndefined => "finished.undefined",
            CounterBucket::Failed => "failed",
            CounterBucket::Killed => "killed",
            CounterBucket::Other => "other",
        }
    }
}

impl fmt::Display for CounterBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown counter bucket: {0}")]
pub struct UnknownBucket(pub String);

impl FromStr for CounterBucket {
    type Err = UnknownBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CounterBucket::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == s)
            .ok_or_else(|| UnknownBucket(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for bucket in CounterBucket::ALL {
            assert_eq!(bucket.as_str().parse::<CounterBucket>().unwrap(), bucket);
        }
    }

    #[test]
    fn test_unknown_bucket_rejected() {
        let err = "finished".parse::<CounterBucket>().unwrap_err();
        assert_eq!(err, UnknownBucket("finished".into()));
        assert!("FAILED".parse::<CounterBucket>().is_err());
    }

    #[test]
    fn test_serde_name_matches_display() {
        for bucket in CounterBucket::ALL {
            let json = serde_json::to_string(&bucket).unwrap();
            assert_eq!(json, format!("\"{}\"", bucket));
        }
    }
}
