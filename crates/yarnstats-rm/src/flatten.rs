//! Flattening of nested REST resources into dotted item keys

use serde_json::Value;
use std::collections::BTreeMap;

/// Prefix of every flattened item key
pub const ITEM_KEY_PREFIX: &str = "yarn";

/// Flatten nested objects into `prefix.key.subkey` entries.
///
/// Arrays, scalars and null are leaves; an empty object produces nothing.
pub fn flatten(value: &Value, prefix: &str) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    flatten_into(&mut out, value, prefix);
    out
}

fn flatten_into(out: &mut BTreeMap<String, Value>, value: &Value, prefix: &str) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(out, child, &format!("{prefix}.{key}"));
            }
        }
        leaf => {
            out.insert(prefix.to_string(), leaf.clone());
        }
    }
}

/// Render a flattened leaf the way the monitoring agent expects it
pub fn item_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_cluster_metrics() {
        let reply = json!({
            "clusterMetrics": {
                "appsCompleted": 42,
                "appsFailed": 3,
                "totalMB": 8192
            }
        });

        let flat = flatten(&reply, ITEM_KEY_PREFIX);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat["yarn.clusterMetrics.appsCompleted"], json!(42));
        assert_eq!(flat["yarn.clusterMetrics.appsFailed"], json!(3));
    }

    #[test]
    fn test_arrays_and_scalars_are_leaves() {
        let reply = json!({ "a": { "b": [1, 2], "c": null }, "d": "x" });
        let flat = flatten(&reply, "p");
        assert_eq!(flat["p.a.b"], json!([1, 2]));
        assert_eq!(flat["p.a.c"], Value::Null);
        assert_eq!(flat["p.d"], json!("x"));
    }

    #[test]
    fn test_scalar_root() {
        let flat = flatten(&json!(7), "yarn");
        assert_eq!(flat["yarn"], json!(7));
    }

    #[test]
    fn test_item_text() {
        assert_eq!(item_text(&json!("STARTED")), "STARTED");
        assert_eq!(item_text(&json!(42)), "42");
        assert_eq!(item_text(&json!(true)), "true");
    }
}
