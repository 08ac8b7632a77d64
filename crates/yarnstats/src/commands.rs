//! poll, print and dump

use anyhow::{Context, Result};
use tracing::{info, warn};
use yarnstats_core::{PollSummary, ScriptState, StatsEngine, navigate, navigate_safe, render_pretty};
use yarnstats_rm::ResourceManager;
use yarnstats_store::StateStore;
use yarnstats_util::format_epoch_secs;

/// Exit status of `print` when the value is unsupported
pub const EXIT_UNSUPPORTED: u8 = 1;

/// First line of `dump` output
pub const DUMP_HEADER: &str = "# Debug interface";

/// Answer to a monitoring-agent query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Value(String),
    Unsupported,
}

/// Load state for commands that tolerate a missing or damaged state file
fn load_or_default(store: &dyn StateStore) -> ScriptState {
    match store.load() {
        Ok(state) => state,
        Err(e) if e.is_missing() => {
            info!(state = %store.describe(), "No saved state, starting empty");
            ScriptState::new()
        }
        Err(e) => {
            warn!(state = %store.describe(), error = %e, "Unusable saved state, starting empty");
            ScriptState::new()
        }
    }
}

/// Fetch applications finished since `horizon_secs`, fold them into the
/// saved state and write it back.
///
/// Any resource manager failure aborts before the state is touched, so the
/// state file is left exactly as it was.
pub async fn run_poll(
    rm: &dyn ResourceManager,
    store: &dyn StateStore,
    horizon_secs: i64,
    now_secs: i64,
) -> Result<PollSummary> {
    let state = load_or_default(store);

    info!(horizon = %format_epoch_secs(horizon_secs), "Polling resource manager");
    let apps = rm
        .finished_apps(horizon_secs)
        .await
        .context("Failed to fetch finished applications")?;

    let mut engine = StatsEngine::new(state);
    let summary = engine.ingest(&apps, horizon_secs, now_secs);

    store
        .save(engine.state())
        .with_context(|| format!("Failed to save state to {}", store.describe()))?;

    Ok(summary)
}

/// Look up one scalar for a monitoring agent.
///
/// Never fails: a missing or unreadable state file, a path that does not
/// resolve, or a leaf that is not a scalar all come back as `Unsupported`.
pub fn run_print<S: AsRef<str>>(store: &dyn StateStore, path: &[S], now_secs: i64) -> QueryOutcome {
    let state = match store.load() {
        Ok(state) => state,
        Err(e) => {
            warn!(state = %store.describe(), error = %e, "Cannot answer query");
            return QueryOutcome::Unsupported;
        }
    };

    match navigate_safe(&state.query_tree(now_secs), path) {
        Some(value) => QueryOutcome::Value(value),
        None => QueryOutcome::Unsupported,
    }
}

/// Render any node of the state tree for inspection
pub fn run_dump<S: AsRef<str>>(store: &dyn StateStore, path: &[S], now_secs: i64) -> Result<String> {
    let tree = load_or_default(store).query_tree(now_secs);
    let node = navigate(&tree, path)?;
    Ok(render_pretty(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use yarnstats_rm::MockResourceManager;
    use yarnstats_store::MemoryStore;

    const NOW: i64 = 1_700_000_000;

    fn app(id: &str, state: &str, final_status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "state": state,
            "finalStatus": final_status,
            "queue": "Default",
            "applicationType": "MAPREDUCE",
            "finishedTime": NOW * 1000 - 5_000,
        })
    }

    #[tokio::test]
    async fn test_poll_saves_state() {
        let rm = MockResourceManager::with_apps(vec![app("a1", "FINISHED", "SUCCEEDED")]);
        let store = MemoryStore::new();

        let summary = run_poll(&rm, &store, NOW - 3_600, NOW).await.unwrap();

        assert_eq!(summary.promoted, 1);
        assert_eq!(*rm.requested_since.lock().unwrap(), vec![NOW - 3_600]);
        let saved = store.load().unwrap();
        assert_eq!(saved.queues_stats.get("default", "finished.succeeded").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_poll_failure_leaves_state_untouched() {
        let store = MemoryStore::with_document(r#"{"localVars": {"lastpoll_at": "1"}}"#);
        let before = store.document();
        let rm = MockResourceManager::with_apps(vec![]);
        rm.set_fail_requests(true);

        assert!(run_poll(&rm, &store, 0, NOW).await.is_err());
        assert_eq!(store.document(), before);
    }

    #[tokio::test]
    async fn test_poll_recovers_from_malformed_state() {
        let store = MemoryStore::with_document("garbage");
        let rm = MockResourceManager::with_apps(vec![app("a1", "KILLED", "KILLED")]);

        run_poll(&rm, &store, NOW - 3_600, NOW).await.unwrap();

        let saved = store.load().unwrap();
        assert_eq!(saved.queues_stats.get("default", "killed").unwrap(), 1);
    }

    #[test]
    fn test_print_scalar_and_derived_value() {
        let store = MemoryStore::with_document(
            r#"{"localVars": {"lastpoll_at": "1699999940"},
                "appsHistory": {},
                "queuesStats": {"default": {"failed": 4}}}"#,
        );

        assert_eq!(
            run_print(&store, &["queuesStats", "default", "failed"], NOW),
            QueryOutcome::Value("4".into())
        );
        assert_eq!(
            run_print(&store, &["localVars", "lastpoll_ago"], NOW),
            QueryOutcome::Value("60".into())
        );
    }

    #[test]
    fn test_print_unsupported_cases() {
        let store = MemoryStore::with_document(r#"{"queuesStats": {"default": {"failed": 4}}}"#);
        assert_eq!(
            run_print(&store, &["queuesStats", "default"], NOW),
            QueryOutcome::Unsupported
        );
        assert_eq!(
            run_print(&store, &["queuesStats", "nope", "failed"], NOW),
            QueryOutcome::Unsupported
        );
        assert_eq!(
            run_print(&store, &["localVars", "lastpoll_ago"], NOW),
            QueryOutcome::Unsupported
        );

        let missing = MemoryStore::new();
        assert_eq!(
            run_print(&missing, &["localVars", "lastpoll_at"], NOW),
            QueryOutcome::Unsupported
        );

        let garbage = MemoryStore::with_document("{");
        assert_eq!(
            run_print(&garbage, &["localVars", "lastpoll_at"], NOW),
            QueryOutcome::Unsupported
        );
    }

    #[test]
    fn test_dump_composite_and_invalid_path() {
        let store = MemoryStore::with_document(r#"{"queuesStats": {"default": {"failed": 4}}}"#);

        let text = run_dump(&store, &["queuesStats"], NOW).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["default"]["failed"], 4);
        assert_eq!(value["default"]["other"], 0);

        let err = run_dump(&store, &["queuesStats", "missing"], NOW).unwrap_err();
        assert!(err.to_string().contains("Invalid path"));
    }

    #[test]
    fn test_dump_without_state_shows_empty_tree() {
        let text = run_dump::<&str>(&MemoryStore::new(), &[], NOW).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({ "localVars": {}, "appsHistory": {}, "queuesStats": {} }));
    }
}
