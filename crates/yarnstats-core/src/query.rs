//! Query navigation over the state tree
//!
//! A query path is a sequence of keys walked from the root. Navigation stops
//! early when it reaches a node that is not an object and returns that node
//! as-is, so callers must tolerate a result that is not the leaf they asked
//! for. Safe mode turns that, and every other failure, into "unsupported".

use serde_json::Value;
use tracing::debug;

use crate::{CoreError, CoreResult};

/// Walk `path` from `root`.
///
/// Fails with `InvalidPath` when a segment is absent from an object node.
pub fn navigate<'a, S: AsRef<str>>(root: &'a Value, path: &[S]) -> CoreResult<&'a Value> {
    let mut node = root;

    for (depth, segment) in path.iter().enumerate() {
        let segment = segment.as_ref();
        let Some(object) = node.as_object() else {
            debug!(segment, depth, "Cannot descend into a non-object node");
            return Ok(node);
        };

        node = object.get(segment).ok_or_else(|| CoreError::InvalidPath {
            segment: segment.to_string(),
            depth,
        })?;
    }

    Ok(node)
}

/// Walk `path` for a monitoring agent.
///
/// Returns the leaf rendered as text only when navigation succeeds and the
/// leaf is a string, an integer or a boolean; `None` otherwise.
pub fn navigate_safe<S: AsRef<str>>(root: &Value, path: &[S]) -> Option<String> {
    match navigate(root, path) {
        Ok(leaf) => scalar_text(leaf),
        Err(e) => {
            debug!(error = %e, "Query failed");
            None
        }
    }
}

/// Render a scalar leaf, or `None` for objects, arrays, floats and null
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else {
                n.as_u64().map(|u| u.to_string())
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Pretty-print any node for inspection, keys sorted
pub fn render_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
