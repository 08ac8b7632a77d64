//! Resource manager trait

use async_trait::async_trait;
use serde_json::Value;

use crate::SourceResult;

/// The parts of the resource manager REST API yarnstats reads
#[async_trait]
pub trait ResourceManager: Send + Sync {
    /// Failed, killed and finished applications that completed at or after
    /// `since_secs` (epoch seconds), as raw records.
    async fn finished_apps(&self, since_secs: i64) -> SourceResult<Vec<Value>>;

    /// Any resource under `/ws/v1/`, e.g. `cluster/metrics`
    async fn resource(&self, resource_path: &str) -> SourceResult<Value>;
}
