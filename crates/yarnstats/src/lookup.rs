//! Generic REST item lookup behind `yarnpoll`

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;
use yarnstats_rm::{ITEM_KEY_PREFIX, ResourceManager, SourceResult, flatten, item_text};

/// Fetch a resource and flatten it into item keys like
/// `yarn.clusterMetrics.appsCompleted`
pub async fn fetch_items(
    rm: &dyn ResourceManager,
    resource_path: &str,
) -> SourceResult<BTreeMap<String, Value>> {
    let reply = rm.resource(resource_path).await?;
    let items = flatten(&reply, ITEM_KEY_PREFIX);
    debug!(resource_path, items = items.len(), "Resource flattened");
    Ok(items)
}

/// Value of one item key, rendered for the monitoring agent
pub fn find_item(items: &BTreeMap<String, Value>, item_key: &str) -> Option<String> {
    items.get(item_key).map(item_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use yarnstats_rm::MockResourceManager;

    #[tokio::test]
    async fn test_fetch_and_find() {
        let rm = MockResourceManager::new();
        rm.set_resource(
            "cluster/metrics",
            json!({ "clusterMetrics": { "appsCompleted": 42, "appsFailed": 3 } }),
        );

        let items = fetch_items(&rm, "cluster/metrics").await.unwrap();

        assert_eq!(
            find_item(&items, "yarn.clusterMetrics.appsCompleted"),
            Some("42".into())
        );
        assert_eq!(find_item(&items, "yarn.clusterMetrics"), None);
        assert_eq!(find_item(&items, "yarn.clusterMetrics.nope"), None);
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let rm = MockResourceManager::new();
        assert!(fetch_items(&rm, "cluster/metrics").await.is_err());
    }
}
