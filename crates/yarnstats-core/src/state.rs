//! The state container
//!
//! One `ScriptState` is loaded at the start of an invocation, owned by that
//! invocation, and written back at the end of a successful poll. It is also
//! the root of the tree that queries navigate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use yarnstats_api::{APPS_HISTORY_KEY, LASTPOLL_AGO, LASTPOLL_AT, LOCAL_VARS_KEY, QUEUES_STATS_KEY};

use crate::{AppsHistory, LocalVars, QueuesStats};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptState {
    #[serde(rename = "localVars", default)]
    pub local_vars: LocalVars,

    #[serde(rename = "appsHistory", default)]
    pub apps_history: AppsHistory,

    #[serde(rename = "queuesStats", default)]
    pub queues_stats: QueuesStats,
}

impl ScriptState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The persisted tree, as written to the state file
    pub fn to_tree(&self) -> Value {
        let mut root = Map::new();
        root.insert(LOCAL_VARS_KEY.into(), to_value_or_empty(&self.local_vars));
        root.insert(APPS_HISTORY_KEY.into(), to_value_or_empty(&self.apps_history));
        root.insert(QUEUES_STATS_KEY.into(), to_value_or_empty(&self.queues_stats));
        Value::Object(root)
    }

    /// The tree that queries see: the persisted tree plus derived variables.
    ///
    /// `lastpoll_ago` is added when `lastpoll_at` holds an integer; it is
    /// never written back to disk.
    pub fn query_tree(&self, now_secs: i64) -> Value {
        let mut tree = self.to_tree();

        if let Some(ago) = self.lastpoll_ago(now_secs)
            && let Some(vars) = tree.get_mut(LOCAL_VARS_KEY).and_then(Value::as_object_mut)
        {
            vars.insert(LASTPOLL_AGO.into(), Value::String(ago.to_string()));
        }

        tree
    }

    /// Seconds elapsed since the last successful poll
    pub fn lastpoll_ago(&self, now_secs: i64) -> Option<i64> {
        let at = self.local_vars.get_int(LASTPOLL_AT).ok().flatten()?;
        Some(now_secs.saturating_sub(at))
    }
}

fn to_value_or_empty<T: Serialize>(section: &T) -> Value {
    serde_json::to_value(section).unwrap_or_else(|_| Value::Object(Map::new()))
}
