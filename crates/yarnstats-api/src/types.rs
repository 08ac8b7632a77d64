//! Application records as reported by the resource manager

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Fields an application record must carry to be accepted
pub const REQUIRED_FIELDS: [&str; 6] = [
    "id",
    "state",
    "finalStatus",
    "queue",
    "applicationType",
    "finishedTime",
];

/// Why an incoming application record was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Application record is not an object")]
    NotAnObject,

    #[error("Application record is missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Application record has an invalid field: {0}")]
    Malformed(String),
}

/// A completed application, reduced to the fields the statistics need.
///
/// Any other fields the resource manager sends are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: String,
    pub state: String,
    pub final_status: String,
    pub queue: String,
    pub application_type: String,
    /// Completion time in milliseconds since the epoch
    #[serde(deserialize_with = "deserialize_epoch_millis")]
    pub finished_time: i64,
}

impl ApplicationRecord {
    /// Validate and convert one element of the resource manager's `app` list.
    ///
    /// All missing fields are reported together.
    pub fn from_json(value: &Value) -> Result<Self, RecordError> {
        let object = value.as_object().ok_or(RecordError::NotAnObject)?;

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !object.contains_key(**field))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(RecordError::MissingFields(missing));
        }

        Self::deserialize(value).map_err(|e| RecordError::Malformed(e.to_string()))
    }
}

/// Accept a millisecond timestamp written either as an integer or as a
/// string holding an integer.
pub fn deserialize_epoch_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Millis {
        Int(i64),
        Text(String),
    }

    match Millis::deserialize(deserializer)? {
        Millis::Int(ms) => Ok(ms),
        Millis::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid timestamp: {s:?}"))),
    }
}
