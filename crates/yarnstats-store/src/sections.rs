//! Section-by-section decoding of a saved state document

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use yarnstats_api::{APPS_HISTORY_KEY, LOCAL_VARS_KEY, QUEUES_STATS_KEY};
use yarnstats_core::ScriptState;

use crate::{StoreError, StoreResult};

/// Decode a saved state document.
///
/// The document must be a JSON object. Each of the three sections is decoded
/// on its own; a section that is absent or malformed falls back to its empty
/// default without affecting the other two.
pub fn decode_state(text: &str) -> StoreResult<ScriptState> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| StoreError::Malformed(e.to_string()))?;

    let Value::Object(mut root) = document else {
        return Err(StoreError::Malformed("top level is not an object".into()));
    };

    Ok(ScriptState {
        local_vars: decode_section(&mut root, LOCAL_VARS_KEY),
        apps_history: decode_section(&mut root, APPS_HISTORY_KEY),
        queues_stats: decode_section(&mut root, QUEUES_STATS_KEY),
    })
}

/// Encode a state document
pub fn encode_state(state: &ScriptState) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(state)?)
}

fn decode_section<T>(root: &mut Map<String, Value>, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match root.remove(key) {
        None => {
            debug!(section = key, "Section absent, using defaults");
            T::default()
        }
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            warn!(section = key, error = %e, "Malformed section, using defaults");
            if key == APPS_HISTORY_KEY {
                warn!(
                    "Application history discarded: applications still inside the retention \
                     window will be counted again by the next poll"
                );
            }
            T::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn valid_document() -> Value {
        json!({
            "localVars": { "lastpoll_at": "1700000000" },
            "appsHistory": {
                "application_1_0001": {
                    "state": "FINISHED",
                    "finalStatus": "SUCCEEDED",
                    "queue": "default",
                    "applicationType": "MAPREDUCE",
                    "finishedTime": 1_700_000_000_000_i64,
                    "_processed": "1"
                }
            },
            "queuesStats": {
                "default": {
                    "finished.succeeded": 1, "finished.failed": 0, "finished.killed": 0,
                    "finished.undefined": 0, "failed": 0, "killed": 0, "other": 0
                }
            }
        })
    }

    #[test]
    fn test_decode_valid_document() {
        let state = decode_state(&valid_document().to_string()).unwrap();
        assert_eq!(state.local_vars.get("lastpoll_at"), Some("1700000000"));
        assert!(state.apps_history.get("application_1_0001").unwrap().processed);
        assert_eq!(
            state.queues_stats.get("default", "finished.succeeded").unwrap(),
            1
        );
    }

    #[test]
    fn test_malformed_section_falls_back_alone() {
        let mut document = valid_document();
        document["queuesStats"] = json!(["not", "a", "mapping"]);

        let state = decode_state(&document.to_string()).unwrap();
        assert!(state.queues_stats.is_empty());
        assert_eq!(state.apps_history.len(), 1);
        assert_eq!(state.local_vars.get("lastpoll_at"), Some("1700000000"));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn decode_capturing_logs(text: &str) -> (ScriptState, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let state = tracing::subscriber::with_default(subscriber, || decode_state(text).unwrap());
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        (state, output)
    }

    #[test]
    fn test_malformed_history_warns_about_recounting() {
        let mut document = valid_document();
        document["appsHistory"]["application_1_0001"]["finishedTime"] = json!("soon");

        let (state, logs) = decode_capturing_logs(&document.to_string());

        assert!(state.apps_history.is_empty());
        assert_eq!(state.queues_stats.get("default", "finished.succeeded").unwrap(), 1);
        assert!(logs.contains("counted again"), "{logs}");
    }

    #[test]
    fn test_malformed_counters_do_not_warn_about_recounting() {
        let mut document = valid_document();
        document["queuesStats"] = json!("nope");

        let (_, logs) = decode_capturing_logs(&document.to_string());

        assert!(logs.contains("Malformed section"), "{logs}");
        assert!(!logs.contains("counted again"), "{logs}");
    }

    #[test]
    fn test_missing_sections_default() {
        let state = decode_state(r#"{"localVars": {"polls_total": "4"}}"#).unwrap();
        assert_eq!(state.local_vars.get("polls_total"), Some("4"));
        assert!(state.apps_history.is_empty());
        assert!(state.queues_stats.is_empty());
    }

    #[test]
    fn test_not_json_is_malformed() {
        assert!(matches!(
            decode_state("{ truncated"),
            Err(StoreError::Malformed(_))
        ));
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(matches!(decode_state("[1, 2]"), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_encode_writes_top_level_keys() {
        let state = decode_state(&valid_document().to_string()).unwrap();
        let bytes = encode_state(&state).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["appsHistory", "localVars", "queuesStats"]);
        assert_eq!(value["appsHistory"]["application_1_0001"]["_processed"], json!(true));
    }
}
