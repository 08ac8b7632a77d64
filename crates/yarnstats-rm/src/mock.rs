//! Mock resource manager for testing

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{ResourceManager, SourceError, SourceResult, extract_apps_list};

/// Serves canned replies and records what was asked
#[derive(Debug, Clone, Default)]
pub struct MockResourceManager {
    apps_reply: Arc<Mutex<Option<Value>>>,
    resources: Arc<Mutex<HashMap<String, Value>>>,

    /// Configure every call to fail with a transport error
    pub fail_requests: Arc<Mutex<bool>>,

    /// `since_secs` of every `finished_apps` call, in order
    pub requested_since: Arc<Mutex<Vec<i64>>>,
}

impl MockResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `finished_apps` with `{"apps": {"app": apps}}`
    pub fn with_apps(apps: Vec<Value>) -> Self {
        let mock = Self::new();
        mock.set_apps_reply(serde_json::json!({ "apps": { "app": apps } }));
        mock
    }

    /// Reply to `finished_apps` with an arbitrary document
    pub fn set_apps_reply(&self, reply: Value) {
        *self.apps_reply.lock().unwrap_or_else(|p| p.into_inner()) = Some(reply);
    }

    pub fn set_resource(&self, resource_path: &str, reply: Value) {
        self.resources
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(resource_path.to_string(), reply);
    }

    pub fn set_fail_requests(&self, fail: bool) {
        *self.fail_requests.lock().unwrap_or_else(|p| p.into_inner()) = fail;
    }

    fn check_failure(&self) -> SourceResult<()> {
        if *self.fail_requests.lock().unwrap_or_else(|p| p.into_inner()) {
            return Err(SourceError::Transport("mock failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceManager for MockResourceManager {
    async fn finished_apps(&self, since_secs: i64) -> SourceResult<Vec<Value>> {
        self.requested_since
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(since_secs);
        self.check_failure()?;

        let reply = self
            .apps_reply
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
            .ok_or_else(|| SourceError::EmptyBody("mock://cluster/apps".into()))?;
        extract_apps_list(reply)
    }

    async fn resource(&self, resource_path: &str) -> SourceResult<Value> {
        self.check_failure()?;
        self.resources
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(resource_path)
            .cloned()
            .ok_or_else(|| SourceError::Status {
                status: 404,
                url: format!("mock://{resource_path}"),
            })
    }
}
